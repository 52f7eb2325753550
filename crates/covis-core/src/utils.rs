//! Utility functions for working with numeric slices

/// Concatenate nested arrays, preserving order
///
/// # Examples
///
/// ```rust
/// use covis_core::utils::flatten;
///
/// let nested = vec![vec![1.0, 2.0], vec![], vec![3.0]];
/// assert_eq!(flatten(&nested), vec![1.0, 2.0, 3.0]);
/// ```
pub fn flatten<T: Clone>(arrays: &[Vec<T>]) -> Vec<T> {
    let mut out = Vec::with_capacity(arrays.iter().map(Vec::len).sum());
    for array in arrays {
        out.extend_from_slice(array);
    }
    out
}

/// Sum of a slice
///
/// Returns 0.0 for empty slices.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Minimum and maximum of the finite values of a slice
///
/// Returns `None` when the slice holds no finite value.
pub fn finite_min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
