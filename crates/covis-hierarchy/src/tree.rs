//! Cluster hierarchy of one dimension
//!
//! Nodes live in an arena addressed by [`NodeId`]; children are id lists and
//! parents a separate lookup, so there is no cyclic ownership. The tree never
//! changes after [`HierarchyTree::build`]: folding state lives in a
//! [`CollapseSet`] passed alongside.

use crate::collapse::CollapseSet;
use covis_core::{Cluster, Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Index of a node in its tree's arena
pub type NodeId = usize;

/// A cluster with its place in the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub parent_name: String,
    pub rank: usize,
    pub frequency: f64,
    pub interest: f64,
    pub hierarchical_level: f64,
    pub hierarchical_rank: f64,
    /// Child ids, in report order; empty iff the node is a leaf
    pub children: Vec<NodeId>,
    /// Position in the frequency matrix, leaves only
    pub matrix_index: Option<usize>,
    /// Names of the original leaves under this node
    pub children_leaf_list: Vec<String>,
    /// Matrix indexes of the original leaves under this node, ascending
    pub children_leaf_indexes: Vec<usize>,
    pub depth: usize,
}

impl TreeNode {
    /// Whether this node is an original leaf
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of original leaves under this node
    pub fn leaf_count(&self) -> usize {
        self.children_leaf_indexes.len()
    }

    /// Smallest matrix index under this node
    pub fn first_leaf_index(&self) -> usize {
        self.children_leaf_indexes.first().copied().unwrap_or(usize::MAX)
    }
}

/// Leaves reached from a node under a collapse set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafClosure {
    /// Names of the displayed leaves (original leaves or collapsed nodes)
    pub names: Vec<String>,
    /// Matrix indexes of all original leaves covered
    pub indexes: Vec<usize>,
}

/// The cluster tree of one dimension
#[derive(Debug, Clone)]
pub struct HierarchyTree {
    dimension: String,
    nodes: Vec<TreeNode>,
    parents: Vec<Option<NodeId>>,
    by_name: HashMap<String, NodeId>,
    root: NodeId,
    /// Leaf ids in matrix order
    leaves: Vec<NodeId>,
}

impl HierarchyTree {
    /// Build the tree from the flat cluster list of a dimension
    ///
    /// Leaves get matrix indexes in their order of appearance. Fails with
    /// [`Error::MalformedHierarchy`] on zero or several roots, a dangling or
    /// duplicated name, a leaf flag that disagrees with the children, or a
    /// node unreachable from the root.
    #[instrument(skip(clusters), fields(clusters = clusters.len()))]
    pub fn build(dimension: &str, clusters: &[Cluster]) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(clusters.len());
        for (id, cluster) in clusters.iter().enumerate() {
            if by_name.insert(cluster.name.clone(), id).is_some() {
                return Err(Error::malformed(dimension, &cluster.name, "duplicate cluster name"));
            }
        }

        let mut root = None;
        let mut parents = vec![None; clusters.len()];
        let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); clusters.len()];
        for (id, cluster) in clusters.iter().enumerate() {
            if cluster.is_root() {
                if let Some(first) = root {
                    let first: &Cluster = &clusters[first];
                    return Err(Error::malformed(
                        dimension,
                        &cluster.name,
                        format!("second root (first root is '{}')", first.name),
                    ));
                }
                root = Some(id);
                continue;
            }
            let parent = *by_name.get(&cluster.parent_name).ok_or_else(|| {
                Error::malformed(
                    dimension,
                    &cluster.name,
                    format!("parent '{}' does not exist", cluster.parent_name),
                )
            })?;
            parents[id] = Some(parent);
            children[parent].push(id);
        }
        let root = root.ok_or_else(|| {
            let name = clusters.first().map_or("", |c| c.name.as_str());
            Error::malformed(dimension, name, "no root cluster")
        })?;

        for (id, cluster) in clusters.iter().enumerate() {
            if cluster.is_leaf != children[id].is_empty() {
                let reason = if cluster.is_leaf {
                    "leaf cluster has children"
                } else {
                    "internal cluster has no children"
                };
                return Err(Error::malformed(dimension, &cluster.name, reason));
            }
        }

        // Pre-order walk from the root; anything not reached sits on a cycle
        let mut preorder = Vec::with_capacity(clusters.len());
        let mut depths = vec![0usize; clusters.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            preorder.push(id);
            for &child in children[id].iter().rev() {
                depths[child] = depths[id] + 1;
                stack.push(child);
            }
        }
        if preorder.len() != clusters.len() {
            let mut reached = vec![false; clusters.len()];
            for &id in &preorder {
                reached[id] = true;
            }
            let orphan = reached.iter().position(|r| !r).unwrap_or(0);
            return Err(Error::malformed(
                dimension,
                &clusters[orphan].name,
                "not reachable from the root",
            ));
        }

        let leaves: Vec<NodeId> = (0..clusters.len()).filter(|&id| children[id].is_empty()).collect();
        let mut matrix_index = vec![None; clusters.len()];
        for (index, &id) in leaves.iter().enumerate() {
            matrix_index[id] = Some(index);
        }

        // Leaf closures, children before parents
        let mut leaf_lists: Vec<Vec<String>> = vec![Vec::new(); clusters.len()];
        let mut leaf_indexes: Vec<Vec<usize>> = vec![Vec::new(); clusters.len()];
        for &id in preorder.iter().rev() {
            if let Some(index) = matrix_index[id] {
                leaf_lists[id] = vec![clusters[id].name.clone()];
                leaf_indexes[id] = vec![index];
                continue;
            }
            let mut pairs: Vec<(usize, String)> = Vec::new();
            for &child in &children[id] {
                pairs.extend(
                    leaf_indexes[child]
                        .iter()
                        .copied()
                        .zip(leaf_lists[child].iter().cloned()),
                );
            }
            pairs.sort_unstable_by_key(|(index, _)| *index);
            let (indexes, names) = pairs.into_iter().unzip();
            leaf_indexes[id] = indexes;
            leaf_lists[id] = names;
        }

        let nodes: Vec<TreeNode> = clusters
            .iter()
            .enumerate()
            .zip(children)
            .zip(leaf_lists.into_iter().zip(leaf_indexes))
            .map(|(((id, cluster), children), (list, indexes))| TreeNode {
                id,
                name: cluster.name.clone(),
                parent_name: cluster.parent_name.clone(),
                rank: cluster.rank,
                frequency: cluster.frequency,
                interest: cluster.interest,
                hierarchical_level: cluster.hierarchical_level,
                hierarchical_rank: cluster.hierarchical_rank,
                children,
                matrix_index: matrix_index[id],
                children_leaf_list: list,
                children_leaf_indexes: indexes,
                depth: depths[id],
            })
            .collect();

        debug!(
            dimension,
            nodes = nodes.len(),
            leaves = leaves.len(),
            "built hierarchy"
        );

        Ok(Self {
            dimension: dimension.to_string(),
            nodes,
            parents,
            by_name,
            root,
            leaves,
        })
    }

    /// Name of the dimension this tree belongs to
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    /// The root node
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root]
    }

    /// Node by id
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Node by cluster name
    pub fn node_by_name(&self, name: &str) -> Option<&TreeNode> {
        self.by_name.get(name).map(|&id| &self.nodes[id])
    }

    /// All nodes, in report order
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes (never true for a built tree)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent id of a node, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id]
    }

    /// Ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parents[id], move |&p| self.parents[p])
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Original leaves, in matrix order
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.leaves.iter().map(move |&id| &self.nodes[id])
    }

    /// Number of original leaves
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaves reached from `id` under a collapse set
    ///
    /// The walk stops at collapsed nodes, which are reported as leaves by name
    /// while their full cached closure contributes the matrix indexes.
    pub fn collect_leaf_closure(&self, id: NodeId, collapse: &CollapseSet) -> LeafClosure {
        let mut closure = LeafClosure::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            if node.is_leaf() || collapse.contains(&node.name) {
                closure.names.push(node.name.clone());
                closure.indexes.extend_from_slice(&node.children_leaf_indexes);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        closure
    }

    /// Nodes displayed as leaves under a collapse set, in original leaf order
    ///
    /// Ordering is by smallest covered matrix index, so rows and columns keep
    /// their relative order across folds.
    pub fn apply_collapse_set(&self, collapse: &CollapseSet) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            if node.is_leaf() || collapse.contains(&node.name) {
                out.push(node);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        out.sort_by_key(|node| node.first_leaf_index());
        out
    }

    /// Number of nodes displayed as leaves under a collapse set
    pub fn visible_leaf_count(&self, collapse: &CollapseSet) -> usize {
        self.apply_collapse_set(collapse).len()
    }

    /// Nodes shown by a tree widget: every node not strictly under a collapsed node
    ///
    /// Returned in pre-order from the root.
    pub fn visible_nodes(&self, collapse: &CollapseSet) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            out.push(node);
            if !collapse.contains(&node.name) {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}
