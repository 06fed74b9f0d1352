//! Structure discovery.
//!
//! Walks a whole tree and reports one type label per structural position.
//! Elements of indexed containers collapse into a single `*` segment, so
//! `users.0.name` and `users.1.name` both land on `users.*.name`; when the
//! collapsed siblings disagree the label becomes a union such as
//! `string|null`.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::node::{NodeKind, TreeNode};
use crate::segment::WILDCARD;

/// The set of type names observed at one structural position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLabel {
    labels: Vec<String>,
}

impl TypeLabel {
    /// A label with a single type name.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
        }
    }

    /// Record another observed type name; duplicates are ignored.
    pub fn add(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Observed type names in first-seen order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether more than one type was observed.
    #[must_use]
    pub fn is_union(&self) -> bool {
        self.labels.len() > 1
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("|"))
    }
}

impl Serialize for TypeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Structural signature of a tree: collapsed path to type label.
pub type Structure = IndexMap<String, TypeLabel>;

/// Infer the structure of `tree`.
///
/// Every node below the root gets an entry, containers included. The root
/// itself is not reported.
#[must_use]
pub fn introspect<N: TreeNode>(tree: &N) -> Structure {
    let mut structure = Structure::new();
    walk(tree, None, &mut structure);
    structure
}

fn walk<N: TreeNode>(node: &N, prefix: Option<&str>, out: &mut Structure) {
    let collapse = node.kind() == NodeKind::Indexed;
    for (key, child) in node.children() {
        let segment = if collapse { WILDCARD } else { key.as_str() };
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{segment}"),
            None => segment.to_owned(),
        };
        out.entry(path.clone()).or_default().add(child.type_label());
        if child.is_container() {
            walk(child, Some(&path), out);
        }
    }
}
