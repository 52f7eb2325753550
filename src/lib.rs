//! # covis
//!
//! Hierarchy folding and matrix analytics for coclustering reports.
//!
//! A coclustering report describes each variable by a cluster hierarchy and
//! a partition (numeric intervals or categorical value groups), and gives the
//! joint frequencies of the leaf clusters. This crate folds those
//! hierarchies to any number of displayed clusters and recomputes the
//! partitions, the folded matrix and its statistics.
//!
//! ## Crates
//!
//! - [`covis_core`]: error type, report entities, cell statistics
//! - [`covis_partition`]: intervals and value groups, merge and regroup
//! - [`covis_hierarchy`]: hierarchy trees, collapse sets, folding
//! - [`covis_matrix`]: folded aggregation, statistic modes, background recompute
//! - [`covis_histogram`]: linear and logarithmic histogram geometry
//!
//! ## Quick Start
//!
//! ```rust
//! use covis::{Cluster, CoclusteringSession, Dimension, FrequencyTable, Interval, MatrixMode, Partition};
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
//! let age = Dimension::new(
//!     "age",
//!     vec![
//!         cluster("A", "", false, 1),
//!         cluster("A1", "A", false, 2),
//!         cluster("a1", "A1", true, 3),
//!         cluster("a2", "A1", true, 4),
//!         cluster("a3", "A", true, 5),
//!     ],
//!     Partition::from_intervals(vec![
//!         Interval::new([17.0, 25.0], 30.0),
//!         Interval::new([25.0, 40.0], 50.0),
//!         Interval::new([40.0, 90.0], 20.0),
//!     ])
//!     .unwrap(),
//! );
//! let flag = Dimension::new(
//!     "flag",
//!     vec![
//!         cluster("F", "", false, 1),
//!         cluster("yes", "F", true, 2),
//!         cluster("no", "F", true, 3),
//!     ],
//!     Partition::from_value_groups(vec![
//!         covis::ValueGroup::new(vec!["y".to_string()], vec![40.0]),
//!         covis::ValueGroup::new(vec!["n".to_string()], vec![60.0]),
//!     ])
//!     .unwrap(),
//! );
//! let table = FrequencyTable::from_dense(&[
//!     vec![20.0, 10.0],
//!     vec![15.0, 35.0],
//!     vec![5.0, 15.0],
//! ])
//! .unwrap();
//!
//! let session = CoclusteringSession::new(vec![age, flag], table).unwrap();
//! assert_eq!(session.level_bounds(), (2, 5));
//!
//! let view = session.fold(4).unwrap();
//! assert_eq!(view.partitions[0].labels(), vec!["[17;40]", "]40;90]"]);
//! assert_eq!(view.values(MatrixMode::Frequency), vec![35.0, 45.0, 5.0, 15.0]);
//! ```

pub mod session;

pub use session::{CoclusteringSession, Dimension, SessionView};

pub use covis_core::{stats, Cluster, DimensionKind, Error, Result};
pub use covis_hierarchy::{
    CollapseSet, CollapseSnapshot, HierarchyFolder, HierarchyTree, LeafClosure, NodeId, TreeNode,
};
pub use covis_histogram::{
    compute_bar_geometry, compute_range_x, compute_range_y_linear, compute_range_y_log, Histogram,
    HistogramBar, HistogramConfig, HistogramData, RangeX, RangeY, ScaleMode,
};
pub use covis_matrix::{
    aggregate, compute_cell_stats, AggregatedMatrix, AggregationConfig, AggregationRequest,
    AggregationResult, AxisGrouping, CellRecord, CellStats, FrequencyTable, MatrixMode,
    MatrixSummary, RecomputeScheduler,
};
pub use covis_partition::{Interval, Partition, ValueGroup};

pub use covis_core::VERSION;
