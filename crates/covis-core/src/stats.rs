//! Cell-level statistics for coclustering matrices
//!
//! Pure numeric primitives used to color and scale the matrix: mutual
//! information contribution, Hellinger divergence, conditional probabilities
//! and the cumulative percent transform. None of these functions fail on zero
//! frequencies; degenerate inputs yield the documented sentinel (0).
//!
//! The 2-D functions are thin wrappers over the N-D forms, where the
//! independence expectation of a cell is the product of its axis marginals
//! divided by `total^(n-1)`.

use serde::{Deserialize, Serialize};

/// Mutual information contribution of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MutualInfo {
    /// `p(cell) * ln(p(cell) / p_independent(cell))`
    pub value: f64,
    /// Whether the cell is anti-correlated (value < 0)
    pub is_negative: bool,
}

/// Hellinger divergence of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hellinger {
    /// `sqrt(p) - sqrt(q)`, signed
    pub value: f64,
    /// `value * value`
    pub squared: f64,
}

/// Mutual information contribution of a cell in a 2-D matrix
///
/// `ratio = (cell * total) / (row * col)`, `value = (cell / total) * ln(ratio)`.
/// A zero cell frequency short-circuits to `0` before the ratio is formed.
///
/// # Examples
///
/// ```rust
/// use covis_core::stats::mutual_info_contribution;
///
/// let mi = mutual_info_contribution(116.0, 48842.0, 1461.0, 1601.0);
/// assert!((mi.value - 0.002101109894746098).abs() < 1e-15);
/// assert!(!mi.is_negative);
/// ```
pub fn mutual_info_contribution(cell: f64, total: f64, row: f64, col: f64) -> MutualInfo {
    mutual_info_contribution_nd(cell, total, &[row, col])
}

/// Mutual information contribution of a cell given the marginals of every axis
pub fn mutual_info_contribution_nd(cell: f64, total: f64, marginals: &[f64]) -> MutualInfo {
    if cell == 0.0 || total <= 0.0 {
        return MutualInfo::default();
    }
    let expected: f64 = marginals.iter().product();
    if expected <= 0.0 {
        return MutualInfo::default();
    }
    let ratio = cell * total_power(total, marginals.len()) / expected;
    let value = (cell / total) * ratio.ln();
    MutualInfo {
        value,
        is_negative: value < 0.0,
    }
}

/// Contribution of a cell to the information its row carries about the target (column) axis
///
/// `p(col | row) * ln(p(col | row) / p(col))`, the Kullback-Leibler term of the
/// cell in its row's conditional distribution.
pub fn target_mutual_info_contribution(cell: f64, total: f64, row: f64, col: f64) -> MutualInfo {
    if cell == 0.0 || total <= 0.0 || row <= 0.0 || col <= 0.0 {
        return MutualInfo::default();
    }
    let conditional = cell / row;
    let value = conditional * ((cell * total) / (row * col)).ln();
    MutualInfo {
        value,
        is_negative: value < 0.0,
    }
}

/// Hellinger divergence of a cell in a 2-D matrix
///
/// `p = cell / total`, `q = (row * col) / (total * total)`, `value = sqrt(p) - sqrt(q)`.
pub fn hellinger(cell: f64, total: f64, row: f64, col: f64) -> Hellinger {
    hellinger_nd(cell, total, &[row, col])
}

/// Hellinger divergence of a cell given the marginals of every axis
pub fn hellinger_nd(cell: f64, total: f64, marginals: &[f64]) -> Hellinger {
    if total <= 0.0 {
        return Hellinger::default();
    }
    let p = cell / total;
    let q = marginals.iter().product::<f64>() / total_power(total, marginals.len() + 1);
    let value = p.sqrt() - q.sqrt();
    Hellinger {
        value,
        squared: value * value,
    }
}

/// Conditional probability `cell / marginal`, `0` when the marginal is empty
#[inline]
pub fn conditional_probability(cell: f64, marginal: f64) -> f64 {
    if marginal > 0.0 {
        cell / marginal
    } else {
        0.0
    }
}

/// Cumulative percent transform
///
/// Returns `values.len() + 1` entries: `0` then the running sum as a percent of
/// the total. Returns `None` when the values sum to zero.
///
/// # Examples
///
/// ```rust
/// use covis_core::stats::cumulative_percent;
///
/// assert_eq!(
///     cumulative_percent(&[1.0, 2.0, 3.0, 4.0]),
///     Some(vec![0.0, 10.0, 30.0, 60.0, 100.0])
/// );
/// assert_eq!(cumulative_percent(&[0.0, 0.0]), None);
/// ```
pub fn cumulative_percent(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(0.0);
    let mut running = 0.0;
    for v in values {
        running += v;
        out.push(100.0 * running / total);
    }
    Some(out)
}

// total^(n - 1), multiplied out so the 2-D case stays bit-identical to `cell * total`
#[inline]
fn total_power(total: f64, n: usize) -> f64 {
    (1..n).fold(1.0, |acc, _| acc * total)
}
