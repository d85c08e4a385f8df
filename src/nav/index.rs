use std::collections::HashMap;

use serde::Serialize;

use super::node::{NavType, NavigationNode};
use crate::error::{NavError, NavResult};

/// Canonical stand-in for any `:xxx` parameter segment.
pub const WILDCARD: &str = ":param";

/// A tree node as seen through the index, carrying its memoized full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedNode {
    pub full_path: String,
    pub path_segment: String,
    pub label_key: String,
    pub label_default: String,
    pub icon: Option<String>,
    pub nav_type: Option<NavType>,
}

impl IndexedNode {
    fn new(node: &NavigationNode, full_path: String) -> Self {
        Self {
            full_path,
            path_segment: node.path_segment.clone(),
            label_key: node.label_key.clone(),
            label_default: node.label_default.clone(),
            icon: node.icon.clone(),
            nav_type: node.nav_type,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeIndexEntry<'a> {
    pub node: &'a IndexedNode,
    pub parent: Option<&'a IndexedNode>,
}

#[derive(Debug)]
struct Slot {
    pattern: String,
    node: IndexedNode,
    parent: Option<usize>,
}

/// Flattened, ordered view of a navigation tree keyed by normalized pattern.
///
/// Slots are stored in depth-first pre-order; pattern matching walks them in that order.
#[derive(Debug, Default)]
pub struct TreeIndex {
    slots: Vec<Slot>,
    by_pattern: HashMap<String, usize>,
}

impl TreeIndex {
    /// Index `root` and its descendants.
    ///
    /// A root with an empty segment is a virtual anchor: it is not indexed and its children
    /// become parentless, root-level entries. Two nodes normalizing to the same pattern are
    /// rejected.
    pub fn build(root: &NavigationNode) -> NavResult<Self> {
        let mut index = Self::default();
        if root.path_segment.is_empty() {
            for child in &root.children {
                index.insert(child, None, "")?;
            }
        } else {
            index.insert(root, None, "")?;
        }
        tracing::debug!(entries = index.len(), "navigation index built");
        Ok(index)
    }

    fn insert(&mut self, node: &NavigationNode, parent: Option<usize>, base: &str) -> NavResult<()> {
        let segment = node.path_segment.trim_matches('/');
        if segment.is_empty() {
            return Err(NavError::EmptySegment {
                parent: base.to_string(),
            });
        }

        let full_path = if base.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", base, segment)
        };
        let pattern = normalize(&full_path);

        if let Some(&existing) = self.by_pattern.get(&pattern) {
            return Err(NavError::DuplicatePattern {
                pattern,
                first: self.slots[existing].node.full_path.clone(),
                duplicate: full_path,
            });
        }

        let id = self.slots.len();
        self.by_pattern.insert(pattern.clone(), id);
        self.slots.push(Slot {
            pattern,
            node: IndexedNode::new(node, full_path.clone()),
            parent,
        });

        for child in &node.children {
            self.insert(child, Some(id), &full_path)?;
        }
        Ok(())
    }

    pub fn find_node_for_path(&self, path: &str) -> Option<TreeIndexEntry<'_>> {
        if let Some(&id) = self.by_pattern.get(path) {
            return Some(self.entry(id));
        }

        self.slots
            .iter()
            .position(|slot| path_matches_pattern(path, &slot.pattern))
            .map(|id| self.entry(id))
    }

    fn entry(&self, id: usize) -> TreeIndexEntry<'_> {
        let slot = &self.slots[id];
        TreeIndexEntry {
            node: &slot.node,
            parent: slot.parent.map(|parent| &self.slots[parent].node),
        }
    }

    /// Normalized patterns in index order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.pattern.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &IndexedNode> {
        self.slots.iter().map(|slot| &slot.node)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub fn normalize(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                WILDCARD
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Segment-wise match: equal length, and every pattern segment is either a
/// placeholder or byte-equal to the path segment.
pub fn path_matches_pattern(path: &str, pattern: &str) -> bool {
    let path_segments: Vec<&str> = path.split('/').collect();
    let pattern_segments: Vec<&str> = pattern.split('/').collect();

    if path_segments.len() != pattern_segments.len() {
        return false;
    }

    path_segments
        .iter()
        .zip(&pattern_segments)
        .all(|(segment, expected)| expected.starts_with(':') || segment == expected)
}

/// Fill the placeholders of `pattern` with the segments found at the same
/// positions in `concrete`.
pub fn materialize(pattern: &str, concrete: &str) -> String {
    let values: Vec<&str> = concrete.split('/').collect();
    pattern
        .split('/')
        .enumerate()
        .map(|(i, segment)| match values.get(i) {
            Some(value) if segment.starts_with(':') => *value,
            _ => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}
