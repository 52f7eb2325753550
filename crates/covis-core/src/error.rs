//! Error types for coclustering analytics
//!
//! Provides a unified error type for all covis crates.

use thiserror::Error;

/// Core error type for hierarchy, partition and matrix operations
#[derive(Error, Debug)]
pub enum Error {
    /// Structural defect in a dimension's cluster list
    #[error("Malformed hierarchy in dimension '{dimension}' at cluster '{cluster}': {reason}")]
    MalformedHierarchy {
        dimension: String,
        cluster: String,
        reason: String,
    },

    /// A cluster name that is not part of the dimension's hierarchy
    #[error("Unknown cluster '{cluster}' in dimension '{dimension}'")]
    UnknownCluster { dimension: String, cluster: String },

    /// A collapse set that violates the non-ancestor invariant or does not match the trees
    #[error("Invalid collapse set: {0}")]
    InvalidCollapseSet(String),

    /// Invalid partition operation (out of range index, non contiguous merge, ...)
    #[error("Invalid partition: {0}")]
    InvalidPartition(String),

    /// Dimension or length mismatch between two inputs
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create a malformed hierarchy error
    pub fn malformed(dimension: &str, cluster: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHierarchy {
            dimension: dimension.to_string(),
            cluster: cluster.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an unknown cluster error
    pub fn unknown_cluster(dimension: &str, cluster: &str) -> Self {
        Self::UnknownCluster {
            dimension: dimension.to_string(),
            cluster: cluster.to_string(),
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::ShapeMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
    }

    /// Create an error for an out of range partition index
    pub fn partition_index(index: usize, len: usize) -> Self {
        Self::InvalidPartition(format!("index {index} out of range for {len} parts"))
    }
}
