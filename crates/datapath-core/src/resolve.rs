//! Read-side path resolution.
//!
//! A path without wildcards is walked directly and yields one value (null
//! when any step is missing). A path with wildcards switches to expansion:
//! every wildcard fans out over the children of the current node and the
//! terminal values are collected into a [`ResultMap`] keyed by the concrete
//! path of each branch.

use tracing::trace;

use crate::node::TreeNode;
use crate::result_map::ResultMap;
use crate::segment::PathSegment;
use crate::value::Value;

/// Outcome of a read.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<N = Value> {
    /// A direct path's value (null when absent).
    Value(N),
    /// A wildcard path's flattened branches.
    Map(ResultMap<N>),
}

impl<N: TreeNode> Resolved<N> {
    /// Whether this is a direct read that found nothing (or an explicit null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(v) if v.is_null())
    }

    /// The direct value, if this was a direct read.
    #[must_use]
    pub fn as_value(&self) -> Option<&N> {
        match self {
            Self::Value(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    /// The result map, if this was a wildcard read.
    #[must_use]
    pub fn as_map(&self) -> Option<&ResultMap<N>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Value(_) => None,
        }
    }

    /// Consume into the direct value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<N> {
        match self {
            Self::Value(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    /// Consume into the result map, if any.
    #[must_use]
    pub fn into_map(self) -> Option<ResultMap<N>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Value(_) => None,
        }
    }
}

impl From<Resolved<Value>> for Value {
    fn from(resolved: Resolved<Value>) -> Self {
        match resolved {
            Resolved::Value(v) => v,
            Resolved::Map(map) => map.into(),
        }
    }
}

/// One fully expanded branch of a wildcard traversal.
#[derive(Debug)]
pub(crate) struct Branch<'a, N> {
    /// Concrete keys walked, including the literal of a missing step.
    pub(crate) keys: Vec<String>,
    /// The node reached, or `None` when a step was missing.
    pub(crate) node: Option<&'a N>,
    /// Index of the first segment not consumed by this branch.
    pub(crate) rest: usize,
}

impl<N> Branch<'_, N> {
    /// Every key of this branch's concrete path.
    ///
    /// A branch that stopped at a missing step is completed with the literals
    /// of the remaining segments. When a wildcard remains there is nothing to
    /// expand it against, so `None` is returned.
    pub(crate) fn full_keys(&self, segments: &[PathSegment]) -> Option<Vec<String>> {
        let rest = segments.get(self.rest..).unwrap_or_default();
        let tail: Option<Vec<String>> = rest.iter().map(PathSegment::literal).collect();
        tail.map(|tail| {
            let mut keys = self.keys.clone();
            keys.extend(tail);
            keys
        })
    }

    /// The dot-joined concrete path; truncated at the missing step when a
    /// wildcard follows it.
    pub(crate) fn concrete_path(&self, segments: &[PathSegment]) -> String {
        self.full_keys(segments)
            .unwrap_or_else(|| self.keys.clone())
            .join(".")
    }
}

/// Expand `segments` against `tree` into branches, depth-first and
/// left-to-right.
pub(crate) fn expand<'a, N: TreeNode>(tree: &'a N, segments: &[PathSegment]) -> Vec<Branch<'a, N>> {
    let mut branches = Vec::new();
    let mut stack = vec![(tree, 0_usize, Vec::<String>::new())];

    while let Some((node, pos, keys)) = stack.pop() {
        let Some(segment) = segments.get(pos) else {
            branches.push(Branch {
                keys,
                node: Some(node),
                rest: pos,
            });
            continue;
        };
        let next = pos.saturating_add(1);

        match segment.literal() {
            None => {
                // Reverse so the first child is popped first.
                for (key, child) in node.children().into_iter().rev() {
                    let mut child_keys = keys.clone();
                    child_keys.push(key);
                    stack.push((child, next, child_keys));
                }
            },
            Some(literal) => {
                let child = node.child(&literal);
                let mut keys = keys;
                keys.push(literal);
                match child {
                    Some(child) => stack.push((child, next, keys)),
                    None => branches.push(Branch {
                        keys,
                        node: None,
                        rest: next,
                    }),
                }
            },
        }
    }

    branches
}

/// Resolve `segments` against `tree`.
///
/// Empty `segments` return the whole tree. Missing steps never fail: direct
/// reads return null and wildcard reads record a null entry for the branch.
/// That entry keeps the full concrete path unless a wildcard follows the
/// missing step, in which case the path stops at the missing key.
pub fn resolve<N: TreeNode>(tree: &N, segments: &[PathSegment]) -> Resolved<N> {
    if !segments.iter().any(PathSegment::is_wildcard) {
        return Resolved::Value(resolve_direct(tree, segments).cloned().unwrap_or_else(N::null));
    }

    let map: ResultMap<N> = expand(tree, segments)
        .into_iter()
        .map(|branch| {
            let path = branch.concrete_path(segments);
            (path, branch.node.cloned().unwrap_or_else(N::null))
        })
        .collect();

    trace!(entries = map.len(), "resolved wildcard path");
    Resolved::Map(map)
}

/// Whether any branch of `segments` reaches a present node.
///
/// A present null counts. Empty `segments` address the root, which always
/// exists.
#[must_use]
pub fn exists<N: TreeNode>(tree: &N, segments: &[PathSegment]) -> bool {
    if !segments.iter().any(PathSegment::is_wildcard) {
        return resolve_direct(tree, segments).is_some();
    }
    expand(tree, segments)
        .iter()
        .any(|branch| branch.node.is_some())
}

/// Walk a wildcard-free path, returning the node it addresses.
///
/// A wildcard segment is treated as a missing step.
#[must_use]
pub fn resolve_direct<'a, N: TreeNode>(tree: &'a N, segments: &[PathSegment]) -> Option<&'a N> {
    segments.iter().try_fold(tree, |node, segment| {
        segment.literal().and_then(|key| node.child(&key))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::segment::parse;

    fn tree() -> Value {
        Value::from(json!({
            "users": [
                {"name": "Ann", "email": "ann@x", "tags": ["a", "b"]},
                {"name": "Bo", "tags": []},
                {"name": "Cy", "email": null, "tags": ["c"]}
            ],
            "meta": {"count": 3}
        }))
    }

    #[test]
    fn test_empty_segments_return_whole_tree() {
        let tree = tree();
        assert_eq!(resolve(&tree, &[]), Resolved::Value(tree.clone()));
    }

    #[test]
    fn test_direct_path() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, &parse("users.1.name")),
            Resolved::Value(Value::from("Bo"))
        );
        assert_eq!(
            resolve(&tree, &parse("meta")),
            Resolved::Value(Value::from(json!({"count": 3})))
        );
    }

    #[test]
    fn test_direct_missing_is_null() {
        let tree = tree();
        assert!(resolve(&tree, &parse("users.9.name")).is_null());
        assert!(resolve(&tree, &parse("meta.count.deeper")).is_null());
        // An index against a keyed node is just a missing key.
        assert!(resolve(&tree, &parse("meta.0")).is_null());
    }

    #[test]
    fn test_wildcard_collects_concrete_paths() {
        let tree = tree();
        let map = resolve(&tree, &parse("users.*.name")).into_map().unwrap();
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("users.0.name".to_string(), Value::from("Ann")),
                ("users.1.name".to_string(), Value::from("Bo")),
                ("users.2.name".to_string(), Value::from("Cy")),
            ]
        );
    }

    #[test]
    fn test_wildcard_missing_leaf_is_null_entry() {
        let tree = tree();
        let map = resolve(&tree, &parse("users.*.email")).into_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("users.0.email"), Some(&Value::from("ann@x")));
        assert_eq!(map.get("users.1.email"), Some(&Value::Null));
        assert_eq!(map.get("users.2.email"), Some(&Value::Null));
    }

    #[test]
    fn test_wildcard_missing_intermediate_keeps_full_path() {
        let tree = Value::from(json!([{"a": {"b": 1}}, {"x": 2}]));
        let map = resolve(&tree, &parse("*.a.b")).into_map().unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["0.a.b", "1.a.b"]);
        assert_eq!(map.get("1.a.b"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_step_before_wildcard_truncates() {
        let tree = Value::from(json!([{"a": [{"b": 1}]}, {"x": 2}]));
        let map = resolve(&tree, &parse("*.a.*.b")).into_map().unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["0.a.0.b", "1.a"]);
        assert_eq!(map.get("1.a"), Some(&Value::Null));
    }

    #[test]
    fn test_root_wildcard_has_no_prefix() {
        let tree = Value::from(json!({"a": 1, "b": 2}));
        let map = resolve(&tree, &parse("*")).into_map().unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_wildcards_depth_first() {
        let tree = tree();
        let map = resolve(&tree, &parse("users.*.tags.*")).into_map().unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["users.0.tags.0", "users.0.tags.1", "users.2.tags.0"]);
    }

    #[test]
    fn test_wildcard_over_leaf_or_empty_yields_nothing() {
        let tree = tree();
        assert!(resolve(&tree, &parse("meta.count.*")).into_map().unwrap().is_empty());
        assert!(resolve(&tree, &parse("users.1.tags.*")).into_map().unwrap().is_empty());
    }

    #[test]
    fn test_exists_uses_branch_nodes() {
        let tree = Value::from(json!({"groups": {"*": {"a.b": null}, "x": {}}}));
        let segments = vec![
            PathSegment::Key("groups".to_owned()),
            PathSegment::Wildcard,
            PathSegment::Key("a.b".to_owned()),
        ];
        assert!(exists(&tree, &segments));
        assert!(!exists(&tree, &parse("groups.*.missing")));
        assert!(exists(&tree, &parse("groups.x")));
        assert!(exists(&tree, &[]));
        assert!(!exists(&tree, &parse("meta.*")));
    }

    #[test]
    fn test_resolve_json_tree() {
        let tree = json!({"items": [{"id": 1}, {"id": 2}]});
        let map = resolve(&tree, &parse("items.*.id")).into_map().unwrap();
        let values: Vec<_> = map.values().cloned().collect();
        assert_eq!(values, vec![json!(1), json!(2)]);
    }
}
