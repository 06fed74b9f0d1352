//! Write-side path mutation.
//!
//! Direct paths walk the tree creating missing containers on the way and
//! assign the terminal value. Wildcard paths enumerate exactly the branches
//! [`resolve`](crate::resolve::resolve) would report for the same path and
//! write each of them:
//!
//! - a single value is broadcast to every branch;
//! - a [`ResultMap`] is consumed in iteration order and paired with the
//!   branches by position. Keys of the map are ignored, so the output of a
//!   read on one tree can be written into a structurally different tree.
//!   Surplus entries are dropped and surplus branches are left untouched;
//!   either mismatch is logged at `warn`.
//!
//! A branch whose walk stopped at a missing key is still a write target when
//! the rest of its path has no wildcard (the missing part is created). When
//! the rest contains a wildcard there is nothing to expand; the branch still
//! consumes its positional entry but nothing is written.

use tracing::{trace, warn};

use crate::error::{PathError, PathResult};
use crate::node::{NodeKind, TreeNodeMut};
use crate::resolve::{Resolved, expand};
use crate::result_map::ResultMap;
use crate::segment::{PathSegment, render};
use crate::value::Value;

/// The value side of a write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue<N = Value> {
    /// One value, broadcast to every wildcard branch.
    Single(N),
    /// Flattened values, paired with wildcard branches by position.
    Map(ResultMap<N>),
}

impl<N> From<ResultMap<N>> for WriteValue<N> {
    fn from(map: ResultMap<N>) -> Self {
        Self::Map(map)
    }
}

impl<N> From<Resolved<N>> for WriteValue<N> {
    fn from(resolved: Resolved<N>) -> Self {
        match resolved {
            Resolved::Value(v) => Self::Single(v),
            Resolved::Map(map) => Self::Map(map),
        }
    }
}

impl From<Value> for WriteValue<Value> {
    fn from(value: Value) -> Self {
        Self::Single(value)
    }
}

impl From<serde_json::Value> for WriteValue<serde_json::Value> {
    fn from(value: serde_json::Value) -> Self {
        Self::Single(value)
    }
}

/// Write `value` at `segments`, returning the number of branches written.
///
/// Empty `segments` replace the whole tree.
///
/// # Errors
///
/// Returns [`PathError::ResultMapOnDirectPath`] when a [`ResultMap`] is
/// written to a path without wildcards.
pub fn mutate<N: TreeNodeMut>(
    tree: &mut N,
    segments: &[PathSegment],
    value: WriteValue<N>,
) -> PathResult<usize> {
    if !segments.iter().any(PathSegment::is_wildcard) {
        let WriteValue::Single(value) = value else {
            return Err(PathError::ResultMapOnDirectPath {
                path: render(segments),
            });
        };
        let keys: Vec<String> = segments.iter().filter_map(PathSegment::literal).collect();
        write_direct(tree, &keys, value);
        return Ok(1);
    }

    let targets = write_targets(tree, segments);
    let mut written = 0_usize;

    match value {
        WriteValue::Single(value) => {
            for keys in targets.iter().flatten() {
                write_direct(tree, keys, value.clone());
                written = written.saturating_add(1);
            }
        },
        WriteValue::Map(map) => {
            if map.len() != targets.len() {
                warn!(
                    path = %render(segments),
                    entries = map.len(),
                    branches = targets.len(),
                    "result map size does not match wildcard branches; pairing by position"
                );
            }
            for (keys, value) in targets.iter().zip(map.into_values()) {
                if let Some(keys) = keys {
                    write_direct(tree, keys, value);
                    written = written.saturating_add(1);
                }
            }
        },
    }

    trace!(path = %render(segments), written, "mutated wildcard path");
    Ok(written)
}

/// Concrete key paths for every branch of a wildcard write, in resolver
/// order. `None` marks a branch that cannot be written.
fn write_targets<N: TreeNodeMut>(tree: &N, segments: &[PathSegment]) -> Vec<Option<Vec<String>>> {
    expand(tree, segments)
        .into_iter()
        .map(|branch| {
            if branch.node.is_some() {
                return Some(branch.keys);
            }
            branch.full_keys(segments)
        })
        .collect()
}

/// Assign `value` at `keys`, creating intermediate containers.
fn write_direct<N: TreeNodeMut>(tree: &mut N, keys: &[String], value: N) {
    let Some((last, parents)) = keys.split_last() else {
        *tree = value;
        return;
    };
    let mut node = tree;
    for key in parents {
        node = node.entry(key);
    }
    node.set_child(last, value);
}

/// Remove the child addressed by `segments`, returning how many were
/// removed. Wildcards remove the addressed child under every branch;
/// missing paths remove nothing.
pub fn remove<N: TreeNodeMut>(tree: &mut N, segments: &[PathSegment]) -> usize {
    let targets: Vec<Vec<String>> = if segments.iter().any(PathSegment::is_wildcard) {
        expand(tree, segments)
            .into_iter()
            .filter(|branch| branch.node.is_some())
            .map(|branch| branch.keys)
            .collect()
    } else {
        vec![segments.iter().filter_map(PathSegment::literal).collect()]
    };

    // Last branch first so removing list elements keeps earlier positions valid.
    let removed = targets
        .iter()
        .rev()
        .filter(|keys| remove_direct(tree, keys))
        .count();
    trace!(path = %render(segments), removed, "removed path");
    removed
}

fn remove_direct<N: TreeNodeMut>(tree: &mut N, keys: &[String]) -> bool {
    let Some((last, parents)) = keys.split_last() else {
        return false;
    };
    let mut node = tree;
    for key in parents {
        match node.child_mut(key) {
            Some(child) => node = child,
            None => return false,
        }
    }
    node.remove_child(last).is_some()
}

/// Recursively merge `overlay` into `base`.
///
/// Keyed containers merge per key; anything else in the overlay replaces
/// the base value.
pub fn deep_merge<N: TreeNodeMut>(base: &mut N, overlay: &N) {
    if base.kind() != NodeKind::Keyed || overlay.kind() != NodeKind::Keyed {
        *base = overlay.clone();
        return;
    }
    for (key, overlay_child) in overlay.children() {
        if let Some(base_child) = base.child_mut(&key) {
            deep_merge(base_child, overlay_child);
        } else {
            base.set_child(&key, overlay_child.clone());
        }
    }
}
