//! Prelude module - commonly used types for convenient import.
//!
//! Use `use datapath::prelude::*;` to import the helpers together with the
//! core path types.

pub use datapath_core::prelude::*;

// Helpers
pub use crate::{DataAccessor, DataMapper, DataMutator};

// Configuration
pub use crate::{Mapping, MapperConfig, MapperOptions};

// Errors
pub use crate::{MapperError, MapperResult};
