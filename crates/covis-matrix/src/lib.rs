//! Folded coclustering matrices
//!
//! Given the unfolded frequency table of a coclustering and one collapse set
//! per axis, this crate produces the folded cells and their statistics.
//!
//! # Key Types
//!
//! - [`FrequencyTable`]: sparse N-D table over the original leaves
//! - [`AxisGrouping`]: leaf to displayed group lookup for one axis
//! - [`aggregate`]: the folding pass, returning an [`AggregatedMatrix`]
//! - [`MatrixMode`]: the statistic shown in the matrix
//! - [`RecomputeScheduler`]: background recompute where the latest request wins
//!
//! # Example
//!
//! ```rust
//! use covis_matrix::{aggregate, AggregationConfig, AxisGrouping, FrequencyTable, MatrixMode};
//!
//! let table = FrequencyTable::from_dense(&[
//!     vec![10.0, 2.0],
//!     vec![3.0, 5.0],
//!     vec![0.0, 4.0],
//! ])
//! .unwrap();
//!
//! let rows = AxisGrouping::from_groups(
//!     vec!["r01".to_string(), "r2".to_string()],
//!     vec![vec![0, 1], vec![2]],
//!     3,
//! )
//! .unwrap();
//! let groupings = vec![rows, AxisGrouping::identity(2)];
//!
//! let matrix = aggregate(&table, &groupings, &AggregationConfig::default()).unwrap();
//! assert_eq!(matrix.values(MatrixMode::Frequency), vec![13.0, 7.0, 4.0]);
//! assert_eq!(matrix.total_frequency, table.total_frequency());
//! ```

pub mod aggregate;
pub mod grouping;
pub mod mode;
pub mod scheduler;
pub mod table;

pub use aggregate::{aggregate, AggregatedMatrix, AggregationConfig, CellRecord, MatrixSummary};
pub use grouping::AxisGrouping;
pub use mode::{compute_cell_stats, CellStats, MatrixMode};
pub use scheduler::{AggregationRequest, AggregationResult, RecomputeScheduler, Ticket};
pub use table::{FrequencyTable, RawCell};

pub use covis_core::Result;
