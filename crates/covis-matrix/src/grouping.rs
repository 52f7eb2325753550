//! Leaf to display-group lookup for one matrix axis

use covis_core::{Error, Result};
use covis_hierarchy::{CollapseSet, HierarchyTree};
use serde::{Deserialize, Serialize};

/// How the leaves of one axis are grouped into displayed rows or columns
///
/// Built once per fold from the leaf-index lists cached on the visible tree
/// nodes, so aggregation resolves each raw cell with one array lookup per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGrouping {
    names: Vec<String>,
    groups: Vec<Vec<usize>>,
    leaf_to_group: Vec<usize>,
}

impl AxisGrouping {
    /// Grouping of a tree's leaves under a collapse set, in display order
    pub fn from_tree(tree: &HierarchyTree, collapse: &CollapseSet) -> Result<Self> {
        collapse.validate(tree)?;
        let visible = tree.apply_collapse_set(collapse);
        let names = visible.iter().map(|node| node.name.clone()).collect();
        let groups = visible
            .iter()
            .map(|node| node.children_leaf_indexes.clone())
            .collect();
        Self::from_groups(names, groups, tree.leaf_count())
    }

    /// One group per leaf
    pub fn identity(n_leaves: usize) -> Self {
        Self {
            names: (0..n_leaves).map(|i| i.to_string()).collect(),
            groups: (0..n_leaves).map(|i| vec![i]).collect(),
            leaf_to_group: (0..n_leaves).collect(),
        }
    }

    /// Grouping from explicit leaf lists
    ///
    /// Every leaf in `0..n_leaves` must belong to exactly one group.
    pub fn from_groups(names: Vec<String>, groups: Vec<Vec<usize>>, n_leaves: usize) -> Result<Self> {
        if names.len() != groups.len() {
            return Err(Error::size_mismatch(groups.len(), names.len(), "axis group names"));
        }
        let mut leaf_to_group = vec![usize::MAX; n_leaves];
        for (group, leaves) in groups.iter().enumerate() {
            for &leaf in leaves {
                let slot = leaf_to_group.get_mut(leaf).ok_or_else(|| {
                    Error::InvalidInput(format!("leaf {leaf} out of range for {n_leaves} leaves"))
                })?;
                if *slot != usize::MAX {
                    return Err(Error::InvalidInput(format!(
                        "leaf {leaf} belongs to groups {} and {group}",
                        *slot
                    )));
                }
                *slot = group;
            }
        }
        if let Some(leaf) = leaf_to_group.iter().position(|&g| g == usize::MAX) {
            return Err(Error::InvalidInput(format!("leaf {leaf} belongs to no group")));
        }
        Ok(Self {
            names,
            groups,
            leaf_to_group,
        })
    }

    /// Number of displayed groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the axis has no group
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of original leaves
    pub fn n_leaves(&self) -> usize {
        self.leaf_to_group.len()
    }

    /// Display group holding a leaf
    #[inline]
    pub fn group_of(&self, leaf: usize) -> Option<usize> {
        self.leaf_to_group.get(leaf).copied()
    }

    /// Group names, in display order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Original leaf indexes of a group
    pub fn leaf_indexes(&self, group: usize) -> &[usize] {
        &self.groups[group]
    }

    /// All groups, in display order
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }
}
