//! Report entity shapes consumed by the engine
//!
//! These mirror the already-parsed report JSON. Field names follow the report
//! format (camelCase), with aliases for the older `cluster`/`parentCluster`
//! spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One node of a dimension's cluster hierarchy, as listed in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster name, unique within the dimension
    #[serde(alias = "cluster")]
    pub name: String,
    /// Parent cluster name, empty for the root
    #[serde(alias = "parentCluster", default)]
    pub parent_name: String,
    pub is_leaf: bool,
    /// Unique within the dimension; lower ranks merge later
    pub rank: usize,
    pub frequency: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub hierarchical_level: f64,
    pub hierarchical_rank: f64,
}

impl Cluster {
    /// Whether this cluster is the root of its hierarchy
    pub fn is_root(&self) -> bool {
        self.parent_name.is_empty()
    }
}

/// Kind of variable a dimension discretizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionKind {
    /// Numeric variable partitioned into intervals
    #[serde(alias = "Numerical")]
    Numerical,
    /// Categorical variable partitioned into value groups
    #[serde(alias = "Categorical")]
    Categorical,
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numerical => write!(f, "Numerical"),
            Self::Categorical => write!(f, "Categorical"),
        }
    }
}

impl FromStr for DimensionKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "numerical" | "numeric" => Ok(Self::Numerical),
            "categorical" => Ok(Self::Categorical),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown dimension type '{other}'"
            ))),
        }
    }
}
