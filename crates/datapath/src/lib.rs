//! Datapath - read, write and map nested value trees by dot-notation path.
//!
//! This crate builds on the path engine in [`datapath_core`] and provides:
//! - [`DataAccessor`] for reads, typed getters and structure discovery
//! - [`DataMutator`] for writes, merges and removals on an owned tree
//! - [`DataMapper`] for copying between trees from a list of mappings,
//!   optionally loaded from a TOML [`MapperConfig`]
//!
//! # Example
//!
//! ```rust
//! use datapath::{DataAccessor, DataMutator};
//! use datapath_core::Value;
//! use serde_json::json;
//!
//! let source = Value::from(json!({"users": [{"email": "a@x"}, {"email": "b@x"}]}));
//! let emails = DataAccessor::new(&source).get("users.*.email");
//!
//! let mut mutator = DataMutator::new(Value::from(json!({"contacts": [{}, {}]})));
//! mutator.set("contacts.*.email", emails)?;
//!
//! assert_eq!(
//!     mutator.accessor().get_string("contacts.0.email").as_deref(),
//!     Some("a@x")
//! );
//! # Ok::<(), datapath_core::PathError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod accessor;
mod config;
mod error;
mod mapper;
mod mutator;

pub use accessor::DataAccessor;
pub use config::{Mapping, MapperConfig, MapperOptions};
pub use error::{MapperError, MapperResult};
pub use mapper::DataMapper;
pub use mutator::DataMutator;
