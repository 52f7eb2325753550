//! Collapse sets and their persisted form
//!
//! A [`CollapseSet`] names the nodes of one dimension that are displayed as
//! leaves. It is a plain value: folding returns new sets instead of mutating
//! the current ones, so a previous state can be kept for undo or handed to a
//! background recompute.

use crate::tree::HierarchyTree;
use covis_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Names of the nodes of one dimension currently collapsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseSet {
    names: BTreeSet<String>,
}

impl CollapseSet {
    /// An empty set: the hierarchy is fully unfolded
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named node is collapsed
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of collapsed nodes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing is collapsed
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Collapsed node names, in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// A copy of this set with `name` added
    pub fn with(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.insert(name.into());
        Self { names }
    }

    /// A copy of this set with `name` removed
    pub fn without(&self, name: &str) -> Self {
        let mut names = self.names.clone();
        names.remove(name);
        Self { names }
    }

    /// Check the set against a tree
    ///
    /// Every name must be an internal node of the tree, and no collapsed node
    /// may be an ancestor of another.
    pub fn validate(&self, tree: &HierarchyTree) -> Result<()> {
        let mut ids = Vec::with_capacity(self.names.len());
        for name in &self.names {
            let node = tree
                .node_by_name(name)
                .ok_or_else(|| Error::unknown_cluster(tree.dimension(), name))?;
            if node.is_leaf() {
                return Err(Error::InvalidCollapseSet(format!(
                    "leaf '{name}' of dimension '{}' cannot be collapsed",
                    tree.dimension()
                )));
            }
            ids.push(node.id);
        }
        for &id in &ids {
            for ancestor in tree.ancestors(id) {
                if self.contains(&tree.node(ancestor).name) {
                    return Err(Error::InvalidCollapseSet(format!(
                        "'{}' is collapsed under collapsed ancestor '{}' in dimension '{}'",
                        tree.node(id).name,
                        tree.node(ancestor).name,
                        tree.dimension()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<String> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Persisted collapse state: `{dimensionName: [clusterName, ...]}`
///
/// Keys and names are kept sorted so the JSON form is byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseSnapshot {
    dimensions: BTreeMap<String, Vec<String>>,
}

impl CollapseSnapshot {
    /// Capture the collapse sets of all dimensions
    pub fn capture(trees: &[HierarchyTree], sets: &[CollapseSet]) -> Result<Self> {
        if trees.len() != sets.len() {
            return Err(Error::size_mismatch(trees.len(), sets.len(), "collapse snapshot"));
        }
        let mut dimensions = BTreeMap::new();
        for (tree, set) in trees.iter().zip(sets) {
            let names = set.iter().map(str::to_string).collect();
            if dimensions.insert(tree.dimension().to_string(), names).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate dimension name '{}'",
                    tree.dimension()
                )));
            }
        }
        Ok(Self { dimensions })
    }

    /// Rebuild the collapse sets, one per tree, in tree order
    ///
    /// The sets are applied as saved; no folding is re-run. Dimensions absent
    /// from the snapshot restore fully unfolded.
    pub fn restore(&self, trees: &[HierarchyTree]) -> Result<Vec<CollapseSet>> {
        for dimension in self.dimensions.keys() {
            if !trees.iter().any(|t| t.dimension() == dimension) {
                return Err(Error::InvalidCollapseSet(format!(
                    "unknown dimension '{dimension}'"
                )));
            }
        }
        trees
            .iter()
            .map(|tree| {
                let set: CollapseSet = self
                    .dimensions
                    .get(tree.dimension())
                    .map(|names| names.iter().cloned().collect())
                    .unwrap_or_default();
                set.validate(tree)?;
                Ok(set)
            })
            .collect()
    }

    /// Collapsed names saved for a dimension
    pub fn dimension(&self, name: &str) -> Option<&[String]> {
        self.dimensions.get(name).map(Vec::as_slice)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
