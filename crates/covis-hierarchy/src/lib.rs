//! Cluster hierarchies and rank-based folding
//!
//! Each dimension of a coclustering report comes with a flat, rank-ordered
//! list of clusters. This crate rebuilds the tree of each dimension and folds
//! or unfolds those trees to a target number of displayed leaves.
//!
//! # Key Types
//!
//! - [`HierarchyTree`]: arena tree of one dimension, with cached leaf closures
//! - [`CollapseSet`]: names of the nodes displayed as leaves (a plain value)
//! - [`HierarchyFolder`]: greedy fold/unfold across all dimensions
//! - [`CollapseSnapshot`]: persisted `{dimension: [cluster, ...]}` form
//!
//! # Example
//!
//! ```rust
//! use covis_core::Cluster;
//! use covis_hierarchy::{HierarchyFolder, HierarchyTree};
//!
//! let cluster = |name: &str, parent: &str, leaf: bool, rank: usize| Cluster {
//!     name: name.to_string(),
//!     parent_name: parent.to_string(),
//!     is_leaf: leaf,
//!     rank,
//!     frequency: 0.0,
//!     interest: 0.0,
//!     hierarchical_level: 0.0,
//!     hierarchical_rank: rank as f64,
//! };
//! let clusters = vec![
//!     cluster("a", "AB", true, 3),
//!     cluster("b", "AB", true, 4),
//!     cluster("c", "root", true, 5),
//!     cluster("root", "", false, 1),
//!     cluster("AB", "root", false, 2),
//! ];
//!
//! let trees = vec![HierarchyTree::build("Var", &clusters).unwrap()];
//! let folder = HierarchyFolder::new(&trees);
//! let sets = folder.fold_to_level(2);
//!
//! let visible: Vec<_> = trees[0]
//!     .apply_collapse_set(&sets[0])
//!     .iter()
//!     .map(|node| node.name.clone())
//!     .collect();
//! assert_eq!(visible, vec!["AB", "c"]);
//! ```

pub mod collapse;
pub mod folder;
pub mod tree;

pub use collapse::{CollapseSet, CollapseSnapshot};
pub use folder::HierarchyFolder;
pub use tree::{HierarchyTree, LeafClosure, NodeId, TreeNode};

pub use covis_core::Result;
