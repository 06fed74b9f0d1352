//! Datapath Test - shared fixtures for the datapath crates.
//!
//! Fixtures are plain [`serde_json::Value`] trees so that any crate can
//! convert them into its own tree type without a dependency cycle.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! datapath-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use datapath_core::Value;
//! use datapath_test::{init_test_logging, user_profile};
//!
//! #[test]
//! fn reads_profile() {
//!     init_test_logging();
//!     let tree = Value::from(user_profile());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;

pub use fixtures::*;

use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber.
///
/// Honors `RUST_LOG` (defaulting to `warn`) and writes through the test
/// harness's captured output. Safe to call from every test; only the first
/// call installs the subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
