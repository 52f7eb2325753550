//! Core types and statistical primitives for coclustering analytics
//!
//! This crate is the leaf of the covis workspace. It provides:
//!
//! - **Errors**: the unified [`Error`] type and [`Result`] alias
//! - **Statistics**: cell-level measures (mutual information contribution,
//!   Hellinger divergence, conditional probabilities, cumulative percent)
//! - **Model**: the report entity shapes ([`Cluster`], [`DimensionKind`])
//!   consumed by the hierarchy, partition and matrix crates
//!
//! # Example
//!
//! ```rust
//! use covis_core::stats::{hellinger, mutual_info_contribution};
//!
//! let mi = mutual_info_contribution(116.0, 48842.0, 1461.0, 1601.0);
//! let h = hellinger(116.0, 48842.0, 1461.0, 1601.0);
//!
//! assert!(mi.value > 0.0);
//! assert_eq!(h.squared, h.value * h.value);
//! ```

pub mod error;
pub mod model;
pub mod stats;
pub mod utils;

pub use error::{Error, Result};
pub use model::{Cluster, DimensionKind};
pub use stats::{
    conditional_probability, cumulative_percent, hellinger, hellinger_nd,
    mutual_info_contribution, mutual_info_contribution_nd, target_mutual_info_contribution,
    Hellinger, MutualInfo,
};
pub use utils::{flatten, sum};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
