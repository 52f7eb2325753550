//! Ordered partitions of coclustering dimensions
//!
//! A numeric dimension is discretized into contiguous intervals, a categorical
//! one into groups of values. When a hierarchy is folded, the parts covered by
//! a collapsed node are merged into one part; this crate provides those merges
//! and keeps the labels in the report's textual format.
//!
//! # Example
//!
//! ```rust
//! use covis_partition::{Interval, Partition};
//!
//! let partition = Partition::from_intervals(vec![
//!     Interval::new([0.0, 1.0], 10.0),
//!     Interval::new([1.0, 2.5], 20.0),
//!     Interval::new([2.5, 7.0], 5.0),
//! ])
//! .unwrap();
//!
//! let folded = partition.merge_intervals(1).unwrap();
//! assert_eq!(folded.labels(), vec!["[0;1]", "]1;7]"]);
//! assert_eq!(folded.total_frequency(), partition.total_frequency());
//! ```

pub mod partition;
pub mod types;

pub use partition::Partition;
pub use types::{Interval, ValueGroup, MISSING_LABEL, RAW_MISSING_LABEL};

pub use covis_core::Result;
