//! Mapper error types.

use datapath_core::PathError;
use thiserror::Error;

/// Errors raised while loading or applying mappings.
#[derive(Debug, Error)]
pub enum MapperError {
    /// The path engine rejected a write.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A mapping configuration file could not be read.
    #[error("failed to read mapping config {path}: {source}")]
    ReadError {
        /// File that failed to read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A mapping configuration could not be parsed.
    #[error("failed to parse mapping config {path}: {source}")]
    ParseError {
        /// File (or `<inline>`) that failed to parse
        path: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// A mapping configuration file exceeds the size limit.
    #[error("mapping config {path} is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge {
        /// File that was rejected
        path: String,
        /// Size of the file in bytes
        size: u64,
        /// Largest accepted size in bytes
        limit: u64,
    },

    /// A mapping pairs paths that cannot be written.
    #[error("invalid mapping for target '{target}': {reason}")]
    InvalidMapping {
        /// Target path of the offending mapping
        target: String,
        /// Why it is invalid
        reason: String,
    },
}

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;
