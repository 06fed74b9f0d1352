//! Datapath Core - dot-notation path engine over nested value trees.
//!
//! This crate provides:
//! - A lexically permissive path parser (`users.*.email`, `items.0.id`)
//! - A concurrent parse cache
//! - A read resolver that expands wildcards into flat, order-stable result maps
//! - A mutator that creates missing containers and pairs result maps with
//!   wildcard branches by position
//! - Structure introspection that collapses list elements into `*` paths
//!
//! Traversal goes through the [`TreeNode`] / [`TreeNodeMut`] adapter traits,
//! implemented here for the owned [`Value`] model and for
//! [`serde_json::Value`].
//!
//! # Example
//!
//! ```rust
//! use datapath_core::{Resolved, Value, WriteValue, mutate, parse, resolve};
//! use serde_json::json;
//!
//! let source = Value::from(json!({"users": [{"email": "a@x"}, {"email": "b@x"}]}));
//! let emails = resolve(&source, &parse("users.*.email"));
//!
//! let mut target = Value::from(json!({"contacts": [{}, {}]}));
//! mutate(&mut target, &parse("contacts.*.email"), WriteValue::from(emails)).unwrap();
//!
//! assert_eq!(
//!     resolve(&target, &parse("contacts.1.email")),
//!     Resolved::Value(Value::from("b@x"))
//! );
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod cache;
mod error;
mod introspect;
mod mutate;
mod node;
mod resolve;
mod result_map;
mod segment;
mod value;

pub use cache::PathCache;
pub use error::{PathError, PathResult};
pub use introspect::{Structure, TypeLabel, introspect};
pub use mutate::{WriteValue, deep_merge, mutate, remove};
pub use node::{MAX_LIST_PADDING, NodeKind, TreeNode, TreeNodeMut};
pub use resolve::{Resolved, exists, resolve, resolve_direct};
pub use result_map::ResultMap;
pub use segment::{DotPath, PathSegment, WILDCARD, parse, render};
pub use value::{Map, Record, Value};
