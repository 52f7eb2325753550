//! Statistic modes and per-cell statistics
//!
//! The matrix can be colored by several statistics. [`MatrixMode`] is the
//! closed set of them. [`CellStats`] holds every statistic of a cell so the
//! display mode can change without re-aggregating; [`CellStats::value`] is
//! the only place a mode is mapped to a value.

use covis_core::stats::{
    conditional_probability, hellinger_nd, mutual_info_contribution_nd,
    target_mutual_info_contribution,
};
use covis_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistic displayed in the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatrixMode {
    /// Folded cell frequency
    Frequency,
    /// Pointwise mutual information contribution
    MutualInfo,
    /// Information the row carries about the target (last) axis
    MutualInfoWithTarget,
    /// Signed Hellinger divergence from independence
    Hellinger,
    /// `frequency / rowMarginal`
    ProbCell,
    /// `frequency / colMarginal`
    ProbCellReverse,
    /// Summed upstream interest
    CellInterest,
}

impl MatrixMode {
    /// Every mode, in selector order
    pub const ALL: [MatrixMode; 7] = [
        MatrixMode::Frequency,
        MatrixMode::MutualInfo,
        MatrixMode::MutualInfoWithTarget,
        MatrixMode::Hellinger,
        MatrixMode::ProbCell,
        MatrixMode::ProbCellReverse,
        MatrixMode::CellInterest,
    ];

    /// Name used by the report format and the UI selector
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixMode::Frequency => "FREQUENCY",
            MatrixMode::MutualInfo => "MUTUAL_INFO",
            MatrixMode::MutualInfoWithTarget => "MUTUAL_INFO_WITH_TARGET",
            MatrixMode::Hellinger => "HELLINGER",
            MatrixMode::ProbCell => "PROB_CELL",
            MatrixMode::ProbCellReverse => "PROB_CELL_REVERSE",
            MatrixMode::CellInterest => "CELL_INTEREST",
        }
    }
}

impl Default for MatrixMode {
    fn default() -> Self {
        Self::MutualInfo
    }
}

impl fmt::Display for MatrixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown matrix mode '{s}'")))
    }
}

/// Every statistic of one folded cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStats {
    pub mutual_info: f64,
    pub mutual_info_is_negative: bool,
    pub mutual_info_with_target: f64,
    pub hellinger: f64,
    pub hellinger_squared: f64,
    pub prob_cell: f64,
    pub prob_cell_reverse: f64,
    pub interest: f64,
}

impl CellStats {
    /// Compute all statistics of a cell from folded counts
    ///
    /// `marginals` holds the folded marginal of the cell's group on each axis.
    pub fn compute(frequency: f64, total: f64, marginals: &[f64], interest: f64) -> Self {
        let mi = mutual_info_contribution_nd(frequency, total, marginals);
        let h = hellinger_nd(frequency, total, marginals);
        Self {
            mutual_info: mi.value,
            mutual_info_is_negative: mi.is_negative,
            mutual_info_with_target: target_value(frequency, total, marginals),
            hellinger: h.value,
            hellinger_squared: h.squared,
            prob_cell: conditional_probability(frequency, row_marginal(marginals)),
            prob_cell_reverse: conditional_probability(frequency, col_marginal(marginals)),
            interest,
        }
    }

    /// Display value for a mode; `frequency` is the cell's folded count
    pub fn value(&self, mode: MatrixMode, frequency: f64) -> f64 {
        match mode {
            MatrixMode::Frequency => frequency,
            MatrixMode::MutualInfo => self.mutual_info,
            MatrixMode::MutualInfoWithTarget => self.mutual_info_with_target,
            MatrixMode::Hellinger => self.hellinger,
            MatrixMode::ProbCell => self.prob_cell,
            MatrixMode::ProbCellReverse => self.prob_cell_reverse,
            MatrixMode::CellInterest => self.interest,
        }
    }
}

/// Value of one statistic for a cell
pub fn compute_cell_stats(
    mode: MatrixMode,
    frequency: f64,
    total: f64,
    marginals: &[f64],
    interest: f64,
) -> f64 {
    CellStats::compute(frequency, total, marginals, interest).value(mode, frequency)
}

fn row_marginal(marginals: &[f64]) -> f64 {
    marginals.first().copied().unwrap_or(0.0)
}

// Single-axis tables have no column; the whole table acts as one.
fn col_marginal(marginals: &[f64]) -> f64 {
    match marginals {
        [] => 0.0,
        [only] => *only,
        [_, col, ..] => *col,
    }
}

// Row is axis 0, target is the last axis.
fn target_value(frequency: f64, total: f64, marginals: &[f64]) -> f64 {
    let target = marginals.last().copied().unwrap_or(0.0);
    target_mutual_info_contribution(frequency, total, row_marginal(marginals), target).value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in MatrixMode::ALL {
            assert_eq!(mode.to_string().parse::<MatrixMode>().unwrap(), mode);
        }
        assert_eq!("prob_cell".parse::<MatrixMode>().unwrap(), MatrixMode::ProbCell);
        assert!("PROBABILITY".parse::<MatrixMode>().is_err());
        assert_eq!(MatrixMode::default(), MatrixMode::MutualInfo);
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&MatrixMode::MutualInfoWithTarget).unwrap();
        assert_eq!(json, r#""MUTUAL_INFO_WITH_TARGET""#);
        let back: MatrixMode = serde_json::from_str(r#""PROB_CELL_REVERSE""#).unwrap();
        assert_eq!(back, MatrixMode::ProbCellReverse);
    }

    #[test]
    fn test_reference_cell() {
        let stats = CellStats::compute(116.0, 48842.0, &[1461.0, 1601.0], 3.5);
        assert_relative_eq!(stats.mutual_info, 0.002101109894746098, max_relative = 1e-12);
        assert!(!stats.mutual_info_is_negative);
        assert_relative_eq!(stats.hellinger, 0.017420832692368826, max_relative = 1e-12);
        assert_eq!(stats.hellinger_squared, stats.hellinger * stats.hellinger);
        assert_relative_eq!(stats.prob_cell, 116.0 / 1461.0);
        assert_relative_eq!(stats.prob_cell_reverse, 116.0 / 1601.0);
        assert_eq!(stats.interest, 3.5);
    }

    #[test]
    fn test_dispatch_matches_stats() {
        let marginals = [30.0, 45.0];
        let stats = CellStats::compute(12.0, 100.0, &marginals, 0.25);
        let expected = [
            12.0,
            stats.mutual_info,
            stats.mutual_info_with_target,
            stats.hellinger,
            stats.prob_cell,
            stats.prob_cell_reverse,
            stats.interest,
        ];
        for (mode, value) in MatrixMode::ALL.into_iter().zip(expected) {
            assert_eq!(compute_cell_stats(mode, 12.0, 100.0, &marginals, 0.25), value);
        }
    }

    #[test]
    fn test_zero_marginals_are_zero() {
        let stats = CellStats::compute(0.0, 0.0, &[0.0, 0.0], 0.0);
        assert_eq!(stats, CellStats::default());
    }

    #[test]
    fn test_target_mode() {
        // p(col|row) = 0.5, p(col) = 0.25
        let value = compute_cell_stats(MatrixMode::MutualInfoWithTarget, 10.0, 80.0, &[20.0, 20.0], 0.0);
        assert_relative_eq!(value, 0.5 * 2.0_f64.ln(), max_relative = 1e-12);
    }
}
