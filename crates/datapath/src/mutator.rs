//! Write helper that owns its tree.

use std::sync::Arc;

use datapath_core::{
    PathCache, PathResult, Resolved, TreeNodeMut, Value, WriteValue, deep_merge, mutate, remove,
    resolve,
};
use tracing::debug;

use crate::accessor::DataAccessor;

/// Writes values into a tree by dot-notation path.
///
/// ```rust
/// use datapath::DataMutator;
/// use datapath_core::Value;
/// use serde_json::json;
///
/// let mut mutator = DataMutator::new(Value::Null);
/// mutator
///     .set("user.profile.name", Value::from("Ann"))?
///     .set("user.tags.0", Value::from("admin"))?;
///
/// assert_eq!(
///     mutator.into_inner(),
///     Value::from(json!({"user": {"profile": {"name": "Ann"}, "tags": ["admin"]}}))
/// );
/// # Ok::<(), datapath_core::PathError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DataMutator<N = Value> {
    tree: N,
    cache: Arc<PathCache>,
}

impl<N: TreeNodeMut> DataMutator<N> {
    /// Take ownership of `tree`, using the shared path cache.
    #[must_use]
    pub fn new(tree: N) -> Self {
        Self {
            tree,
            cache: PathCache::global(),
        }
    }

    /// Use a specific path cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<PathCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Write `value` at `path`. The empty path replaces the root.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::ResultMapOnDirectPath`](datapath_core::PathError::ResultMapOnDirectPath)
    /// when a result map is written to a path without wildcards.
    pub fn set(&mut self, path: &str, value: impl Into<WriteValue<N>>) -> PathResult<&mut Self> {
        let value = value.into();
        if path.is_empty() {
            mutate(&mut self.tree, &[], value)?;
            return Ok(self);
        }
        let parsed = self.cache.parse(path);
        let written = mutate(&mut self.tree, parsed.segments(), value)?;
        debug!(path, written, "set path");
        Ok(self)
    }

    /// Apply several writes in order.
    ///
    /// # Errors
    ///
    /// Stops at the first write that fails; earlier writes stay applied.
    pub fn set_many<P, V>(&mut self, writes: impl IntoIterator<Item = (P, V)>) -> PathResult<&mut Self>
    where
        P: AsRef<str>,
        V: Into<WriteValue<N>>,
    {
        for (path, value) in writes {
            self.set(path.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Deep-merge `value` into the node at `path`.
    ///
    /// Keyed containers merge key by key; anything else replaces. A missing
    /// target is created. With wildcards, every matched branch is merged.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the path engine.
    pub fn merge(&mut self, path: &str, value: &N) -> PathResult<&mut Self> {
        if path.is_empty() {
            deep_merge(&mut self.tree, value);
            return Ok(self);
        }
        let parsed = self.cache.parse(path);
        let merged = match resolve(&self.tree, parsed.segments()) {
            Resolved::Value(mut current) => {
                deep_merge(&mut current, value);
                WriteValue::Single(current)
            },
            Resolved::Map(branches) => WriteValue::Map(
                branches
                    .into_iter()
                    .map(|(concrete, mut current)| {
                        deep_merge(&mut current, value);
                        (concrete, current)
                    })
                    .collect(),
            ),
        };
        mutate(&mut self.tree, parsed.segments(), merged)?;
        debug!(path, "merged path");
        Ok(self)
    }

    /// Remove the node at `path`; wildcards remove under every branch.
    /// Missing paths are ignored.
    pub fn unset(&mut self, path: &str) -> &mut Self {
        if path.is_empty() {
            self.tree = N::null();
            return self;
        }
        let parsed = self.cache.parse(path);
        let removed = remove(&mut self.tree, parsed.segments());
        debug!(path, removed, "unset path");
        self
    }

    /// Read access to the current tree.
    #[must_use]
    pub fn accessor(&self) -> DataAccessor<'_, N> {
        DataAccessor::new(&self.tree).with_cache(Arc::clone(&self.cache))
    }

    /// The current tree.
    #[must_use]
    pub fn tree(&self) -> &N {
        &self.tree
    }

    /// Consume the mutator, returning the tree.
    #[must_use]
    pub fn into_inner(self) -> N {
        self.tree
    }
}
