//! Flattened wildcard results.

use indexmap::IndexMap;
use serde::Serialize;

use crate::node::TreeNode;
use crate::value::Value;

/// Ordered mapping from concrete paths (`users.2.email`) to the values found
/// there.
///
/// Iteration order is the depth-first, left-to-right order in which the
/// resolver reached each branch. Mutators pair entries with branches by this
/// position, not by key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultMap<N = Value> {
    entries: IndexMap<String, N>,
}

impl<N> Default for ResultMap<N> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<N> ResultMap<N> {
    /// Create an empty result map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Re-inserting a path keeps its original position.
    pub fn insert(&mut self, path: impl Into<String>, value: N) {
        self.entries.insert(path.into(), value);
    }

    /// Value at a concrete path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&N> {
        self.entries.get(path)
    }

    /// Entry at a position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &N)> {
        self.entries
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concrete paths in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in order.
    pub fn values(&self) -> impl Iterator<Item = &N> {
        self.entries.values()
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &N)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into values, in order.
    pub fn into_values(self) -> impl Iterator<Item = N> {
        self.entries.into_values()
    }
}

impl<N: TreeNode> ResultMap<N> {
    /// Keep only entries whose value is not null.
    #[must_use]
    pub fn without_nulls(self) -> Self {
        self.into_iter().filter(|(_, v)| !v.is_null()).collect()
    }
}

impl<N> FromIterator<(String, N)> for ResultMap<N> {
    fn from_iter<I: IntoIterator<Item = (String, N)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<N> IntoIterator for ResultMap<N> {
    type Item = (String, N);
    type IntoIter = indexmap::map::IntoIter<String, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<ResultMap<Value>> for Value {
    fn from(map: ResultMap<Value>) -> Self {
        Self::Map(map.entries)
    }
}
