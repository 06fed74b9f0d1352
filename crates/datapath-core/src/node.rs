//! Uniform view over heterogeneous tree nodes.
//!
//! The resolver, mutator and introspector never match on a concrete value
//! type. They go through [`TreeNode`] for reads and [`TreeNodeMut`] for
//! writes, so any host structure that implements the pair can be traversed.

use crate::segment::PathSegment;
use crate::value::{Map, Record, Value};

/// Structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Exposes named children (maps, records, objects).
    Keyed,
    /// Exposes ordinal children (sequences).
    Indexed,
    /// Terminal value.
    Leaf,
}

impl NodeKind {
    /// The container kind to create when `key` is written into nothing:
    /// indexed for canonical numeric keys that a fresh list can hold
    /// without padding past [`MAX_LIST_PADDING`], keyed otherwise.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        match dense_position(0, key) {
            Some(_) => Self::Indexed,
            None => Self::Keyed,
        }
    }
}

/// Most null slots a single write may add to the end of a list.
///
/// A numeric key further past the end than this turns the list into a keyed
/// container, so a write such as `a.100000000000` stores one entry instead
/// of allocating every position before it.
pub const MAX_LIST_PADDING: usize = 1024;

/// Read access to one position of a tree.
pub trait TreeNode: Clone {
    /// Structural kind of this node.
    fn kind(&self) -> NodeKind;

    /// Whether the node is the null value.
    fn is_null(&self) -> bool;

    /// The null value of this tree type.
    fn null() -> Self;

    /// Look up a direct child by key. Indexed nodes parse `key` as a position.
    fn child(&self, key: &str) -> Option<&Self>;

    /// All direct children in stable order: insertion order for keyed
    /// nodes, ascending position for indexed nodes. Leaves have none.
    fn children(&self) -> Vec<(String, &Self)>;

    /// Semantic type label (`string`, `int`, `array`, a record name, ...).
    fn type_label(&self) -> String;

    /// Whether the node has children.
    fn is_container(&self) -> bool {
        self.kind() != NodeKind::Leaf
    }
}

/// Write access to one position of a tree.
pub trait TreeNodeMut: TreeNode {
    /// A fresh, empty container of the given kind. `Leaf` yields null.
    fn empty_container(kind: NodeKind) -> Self;

    /// Mutable lookup of an existing direct child.
    fn child_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// Mutable access to the child at `key`, creating it as null when
    /// missing. A leaf (including null) in this position is first replaced
    /// by an empty container chosen by [`NodeKind::for_key`]. An indexed
    /// node receiving a named key, or a position more than
    /// [`MAX_LIST_PADDING`] past its end, becomes keyed by former positions.
    fn entry(&mut self, key: &str) -> &mut Self;

    /// Remove a direct child, returning it.
    fn remove_child(&mut self, key: &str) -> Option<Self>;

    /// Assign the child at `key`, vivifying this node if needed.
    fn set_child(&mut self, key: &str, value: Self) {
        *self.entry(key) = value;
    }
}

/// Parse a child key as a sequence position.
fn position(key: &str) -> Option<usize> {
    match PathSegment::from_token(key) {
        PathSegment::Index(index) => Some(index),
        _ => None,
    }
}

/// Parse a child key as a position a list of length `len` may grow to.
fn dense_position(len: usize, key: &str) -> Option<usize> {
    position(key).filter(|&index| index <= len.saturating_add(MAX_LIST_PADDING))
}

/// Grow `items` with nulls until `index` is addressable.
fn pad_to<T: TreeNode>(items: &mut Vec<T>, index: usize) {
    if items.len() <= index {
        items.resize_with(index.saturating_add(1), T::null);
    }
}

impl TreeNode for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Self::List(_) => NodeKind::Indexed,
            Self::Map(_) | Self::Record(_) => NodeKind::Keyed,
            _ => NodeKind::Leaf,
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn null() -> Self {
        Self::Null
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::List(items) => items.get(position(key)?),
            Self::Map(map) => map.get(key),
            Self::Record(record) => record.fields.get(key),
            _ => None,
        }
    }

    fn children(&self) -> Vec<(String, &Self)> {
        match self {
            Self::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Self::Map(map) | Self::Record(Record { fields: map, .. }) => {
                map.iter().map(|(k, v)| (k.clone(), v)).collect()
            },
            _ => Vec::new(),
        }
    }

    fn type_label(&self) -> String {
        Value::type_label(self)
    }
}

impl TreeNodeMut for Value {
    fn empty_container(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Keyed => Self::Map(Map::new()),
            NodeKind::Indexed => Self::List(Vec::new()),
            NodeKind::Leaf => Self::Null,
        }
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            Self::List(items) => items.get_mut(position(key)?),
            Self::Map(map) => map.get_mut(key),
            Self::Record(record) => record.fields.get_mut(key),
            _ => None,
        }
    }

    fn entry(&mut self, key: &str) -> &mut Self {
        let len = match self {
            Self::List(items) => items.len(),
            _ => 0,
        };
        let index = dense_position(len, key);
        // A list receiving a named or far-off key becomes a map keyed by former positions.
        let promote = matches!(self, Self::List(_)) && index.is_none();
        if promote || !self.is_container() {
            *self = match std::mem::take(self) {
                Self::List(items) => Self::Map(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (i.to_string(), v))
                        .collect(),
                ),
                _ => Self::empty_container(NodeKind::for_key(key)),
            };
        }
        match (self, index) {
            (Self::List(items), Some(index)) => {
                pad_to(items, index);
                &mut items[index]
            },
            (Self::Map(map) | Self::Record(Record { fields: map, .. }), _) => {
                map.entry(key.to_owned()).or_insert(Self::Null)
            },
            (other, _) => other,
        }
    }

    fn remove_child(&mut self, key: &str) -> Option<Self> {
        match self {
            Self::List(items) => {
                let index = position(key)?;
                (index < items.len()).then(|| items.remove(index))
            },
            Self::Map(map) => map.shift_remove(key),
            Self::Record(record) => record.fields.shift_remove(key),
            _ => None,
        }
    }
}

impl TreeNode for serde_json::Value {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Array(_) => NodeKind::Indexed,
            Self::Object(_) => NodeKind::Keyed,
            _ => NodeKind::Leaf,
        }
    }

    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }

    fn null() -> Self {
        Self::Null
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Array(items) => items.get(position(key)?),
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn children(&self) -> Vec<(String, &Self)> {
        match self {
            Self::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Self::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }

    fn type_label(&self) -> String {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(n) if n.is_f64() => "float",
            Self::Number(_) => "int",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
        .to_owned()
    }
}

impl TreeNodeMut for serde_json::Value {
    fn empty_container(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Keyed => Self::Object(serde_json::Map::new()),
            NodeKind::Indexed => Self::Array(Vec::new()),
            NodeKind::Leaf => Self::Null,
        }
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            Self::Array(items) => items.get_mut(position(key)?),
            Self::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    fn entry(&mut self, key: &str) -> &mut Self {
        let len = match self {
            Self::Array(items) => items.len(),
            _ => 0,
        };
        let index = dense_position(len, key);
        let promote = matches!(self, Self::Array(_)) && index.is_none();
        if promote || !self.is_container() {
            *self = match std::mem::take(self) {
                Self::Array(items) => Self::Object(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (i.to_string(), v))
                        .collect(),
                ),
                _ => Self::empty_container(NodeKind::for_key(key)),
            };
        }
        match (self, index) {
            (Self::Array(items), Some(index)) => {
                pad_to(items, index);
                &mut items[index]
            },
            (Self::Object(map), _) => map.entry(key.to_owned()).or_insert(Self::Null),
            (other, _) => other,
        }
    }

    fn remove_child(&mut self, key: &str) -> Option<Self> {
        match self {
            Self::Array(items) => {
                let index = position(key)?;
                (index < items.len()).then(|| items.remove(index))
            },
            Self::Object(map) => map.shift_remove(key),
            _ => None,
        }
    }
}
