//! Prelude module - commonly used types for convenient import.
//!
//! Use `use datapath_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{PathError, PathResult};

// Paths
pub use crate::{DotPath, PathCache, PathSegment};

// Values and adapters
pub use crate::{NodeKind, Record, TreeNode, TreeNodeMut, Value};

// Results
pub use crate::{Resolved, ResultMap, Structure, TypeLabel, WriteValue};
