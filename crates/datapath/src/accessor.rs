//! Read helper over a borrowed tree.

use std::sync::Arc;

use datapath_core::{PathCache, Resolved, Structure, TreeNode, Value, exists, introspect, resolve};
use tracing::trace;

/// Reads values out of a tree by dot-notation path.
///
/// ```rust
/// use datapath::DataAccessor;
/// use datapath_core::Value;
/// use serde_json::json;
///
/// let tree = Value::from(json!({"user": {"profile": {"name": "John Doe"}}}));
/// let accessor = DataAccessor::new(&tree);
///
/// assert_eq!(accessor.get_string("user.profile.name").as_deref(), Some("John Doe"));
/// assert!(accessor.get("user.profile.phone").is_null());
/// ```
#[derive(Debug, Clone)]
pub struct DataAccessor<'a, N = Value> {
    tree: &'a N,
    cache: Arc<PathCache>,
}

impl<'a, N: TreeNode> DataAccessor<'a, N> {
    /// Create an accessor using the shared path cache.
    #[must_use]
    pub fn new(tree: &'a N) -> Self {
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

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &'a N {
        self.tree
    }

    /// Read `path`. The empty path returns the whole tree.
    #[must_use]
    pub fn get(&self, path: &str) -> Resolved<N> {
        if path.is_empty() {
            return Resolved::Value(self.tree.clone());
        }
        let parsed = self.cache.parse(path);
        trace!(path, "accessor get");
        resolve(self.tree, parsed.segments())
    }

    /// Read `path`, substituting `default` when a direct read yields null.
    #[must_use]
    pub fn get_or(&self, path: &str, default: N) -> Resolved<N> {
        match self.get(path) {
            Resolved::Value(v) if v.is_null() => Resolved::Value(default),
            other => other,
        }
    }

    /// Whether `path` addresses something.
    ///
    /// A present null counts as existing. A wildcard path exists when at
    /// least one branch reaches a present node.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return true;
        }
        let parsed = self.cache.parse(path);
        exists(self.tree, parsed.segments())
    }

    /// Structural signature of the whole tree.
    #[must_use]
    pub fn structure(&self) -> Structure {
        introspect(self.tree)
    }
}

impl DataAccessor<'_, Value> {
    /// Read a direct path as a string.
    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.direct(path)?.as_str().map(str::to_owned)
    }

    /// Read a direct path as an integer.
    #[must_use]
    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.direct(path)?.as_i64()
    }

    /// Read a direct path as a float; integers widen.
    #[must_use]
    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.direct(path)?.as_f64()
    }

    /// Read a direct path as a boolean.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.direct(path)?.as_bool()
    }

    /// Read a list.
    ///
    /// Direct paths must address a list. Wildcard paths return the values of
    /// their result map in order.
    #[must_use]
    pub fn get_list(&self, path: &str) -> Option<Vec<Value>> {
        match self.get(path) {
            Resolved::Value(Value::List(items)) => Some(items),
            Resolved::Value(_) => None,
            Resolved::Map(map) => Some(map.into_values().collect()),
        }
    }

    fn direct(&self, path: &str) -> Option<Value> {
        self.get(path).into_value()
    }
}

#[cfg(test)]
mod tests {
    use datapath_test::{order, user_profile};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_direct_and_missing() {
        let tree = Value::from(user_profile());
        let accessor = DataAccessor::new(&tree);
        assert_eq!(
            accessor.get("user.profile.name"),
            Resolved::Value(Value::from("John Doe"))
        );
        assert!(accessor.get("user.profile.phone").is_null());
    }

    #[test]
    fn test_get_or_substitutes_default() {
        let tree = Value::from(user_profile());
        let accessor = DataAccessor::new(&tree);
        assert_eq!(
            accessor.get_or("user.profile.phone", Value::from("n/a")),
            Resolved::Value(Value::from("n/a"))
        );
        assert_eq!(
            accessor.get_or("user.profile.name", Value::from("n/a")),
            Resolved::Value(Value::from("John Doe"))
        );
    }

    #[test]
    fn test_empty_path_returns_tree() {
        let tree = Value::from(json!({"a": 1}));
        assert_eq!(DataAccessor::new(&tree).get(""), Resolved::Value(tree.clone()));
    }

    #[test]
    fn test_typed_getters() {
        let tree = Value::from(order());
        let accessor = DataAccessor::new(&tree);
        assert_eq!(accessor.get_int("order.id"), Some(1001));
        assert_eq!(accessor.get_bool("order.customer.vip"), Some(true));
        assert_eq!(accessor.get_float("order.items.1.price"), Some(20.0));
        assert_eq!(accessor.get_string("order.items.0.sku").as_deref(), Some("A-1"));
        assert_eq!(accessor.get_int("order.customer.name"), None);
        assert_eq!(accessor.get_string("order.missing"), None);
    }

    #[test]
    fn test_get_list() {
        let tree = Value::from(order());
        let accessor = DataAccessor::new(&tree);
        let skus = accessor.get_list("order.items.*.sku").unwrap();
        assert_eq!(skus, vec![Value::from("A-1"), Value::from("B-2"), Value::from("C-3")]);
        assert_eq!(accessor.get_list("order.items").map(|items| items.len()), Some(3));
        assert_eq!(accessor.get_list("order.id"), None);
    }

    #[test]
    fn test_exists() {
        let tree = Value::from(order());
        let accessor = DataAccessor::new(&tree);
        assert!(accessor.exists("order.items.1.note"));
        assert!(!accessor.exists("order.items.0.note"));
        assert!(accessor.exists("order.items.*.note"));
        assert!(!accessor.exists("order.items.*.discount"));
        assert!(accessor.exists(""));
    }

    #[test]
    fn test_exists_with_wildcard_named_key() {
        let tree = Value::from(json!({"slots": {"*": {"v": 1}}}));
        let accessor = DataAccessor::new(&tree);
        assert!(accessor.exists("slots.*.v"));
        assert!(!accessor.exists("slots.*.w"));
    }

    #[test]
    fn test_injected_cache_is_used() {
        let tree = Value::from(order());
        let cache = Arc::new(PathCache::new());
        let accessor = DataAccessor::new(&tree).with_cache(Arc::clone(&cache));
        let _ = accessor.get("order.id");
        let _ = accessor.get("order.id");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_accessor_over_json() {
        let tree = order();
        let accessor = DataAccessor::new(&tree);
        assert_eq!(accessor.get("order.customer.name"), Resolved::Value(json!("Eve")));
    }
}
