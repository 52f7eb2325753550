//! Histograms of numeric discretizations
//!
//! Bars come from the intervals of a partition, so their widths vary. This
//! crate computes the linear and logarithmic X ranges, the Y ranges and the
//! bar geometry. The logarithmic X axis handles negative values by mirroring
//! them and reserving a gap around zero.
//!
//! The pipeline is explicit: `compute_range_x` returns a [`RangeX`] which is
//! then passed to [`compute_bar_geometry`].
//!
//! # Example
//!
//! ```rust
//! use covis_histogram::{
//!     compute_bar_geometry, compute_range_x, HistogramConfig, HistogramData, ScaleMode,
//! };
//! use covis_partition::Interval;
//!
//! let intervals = vec![
//!     Interval::new([-10.0, -1.0], 4.0),
//!     Interval::new([-1.0, 1.0], 10.0),
//!     Interval::new([1.0, 100.0], 6.0),
//! ];
//! let config = HistogramConfig::default();
//! let histogram = HistogramData::from_intervals(&intervals, &config);
//!
//! let range = compute_range_x(&histogram.bars, &config);
//! let bars = compute_bar_geometry(&histogram.bars, &range, ScaleMode::Logarithmic, 420.0, &config);
//!
//! // 1 decade, the 1.2 gap, then 2 decades
//! assert!((range.log.width() - 4.2).abs() < 1e-12);
//! assert!((bars[1].width - 120.0).abs() < 1e-9);
//! assert_eq!(bars[1].color, config.gap_color);
//! ```

pub mod config;
pub mod geometry;
pub mod range;
pub mod types;

pub use config::{HistogramConfig, ScaleMode, DEFAULT_MIDDLE_WIDTH};
pub use geometry::compute_bar_geometry;
pub use range::{
    compute_range_x, compute_range_y_linear, compute_range_y_log, LinRange, LogRange, RangeX,
    RangeY,
};
pub use types::{Histogram, HistogramBar, HistogramData, MissingBin};
