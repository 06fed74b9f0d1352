//! Path engine error types.
//!
//! Absent paths are never errors: reads recover them into `null` values or
//! `null` result-map entries. Only programmer errors surface here.

use thiserror::Error;

/// Errors raised by the path engine.
#[derive(Debug, Error)]
pub enum PathError {
    /// A flattened result map was written to a path without wildcards.
    #[error("cannot write a result map to direct path '{path}'; the path has no wildcard")]
    ResultMapOnDirectPath {
        /// The offending write path
        path: String,
    },

    /// A host value could not be classified as keyed, indexed or leaf.
    #[error("unsupported node: {reason}")]
    UnsupportedNode {
        /// Why the value could not be adapted
        reason: String,
    },
}

/// Result type for path engine operations.
pub type PathResult<T> = Result<T, PathError>;
