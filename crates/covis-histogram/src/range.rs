//! Axis ranges for linear and logarithmic histogram rendering
//!
//! Ranges are plain values computed from the bars and passed explicitly to
//! the geometry step; nothing here keeps a current scale between calls.
//!
//! The logarithmic X axis is laid out in log10 units from left to right:
//! the negative side (mirrored, largest magnitude first), then a gap of
//! `middle_width` holding the bars that touch or straddle zero, then the
//! positive side.

use crate::config::{HistogramConfig, ScaleMode};
use crate::types::HistogramData;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear X range: first and last bound
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinRange {
    pub min: f64,
    pub max: f64,
}

impl LinRange {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Logarithmic X range, split at zero
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRange {
    /// Negative bound closest to zero, 0 without negative bounds
    pub neg_start: f64,
    /// Most negative bound, 0 without negative bounds
    pub neg_end: f64,
    /// Smallest strictly positive bound, 0 without positive bounds
    pub pos_start: f64,
    /// Largest bound, 0 without positive bounds
    pub pos_end: f64,
    /// Distinct negative bounds
    pub neg_values_count: usize,
    /// Distinct non-negative bounds
    pub pos_values_count: usize,
    /// Width of the zero gap, 0 when no bar touches zero
    pub middle_width: f64,
}

impl LogRange {
    /// Log10 span of the negative side
    pub fn neg_span(&self) -> f64 {
        if self.neg_values_count == 0 {
            return 0.0;
        }
        self.neg_end.abs().log10() - self.neg_start.abs().log10()
    }

    /// Log10 span of the positive side
    pub fn pos_span(&self) -> f64 {
        if self.pos_start <= 0.0 {
            return 0.0;
        }
        self.pos_end.log10() - self.pos_start.log10()
    }

    /// Total axis width in log units
    pub fn width(&self) -> f64 {
        self.neg_span() + self.middle_width + self.pos_span()
    }

    /// Axis position of a value, from the left end of the axis
    ///
    /// Values between the innermost bounds and zero have no log position and
    /// are placed in the gap.
    pub fn position(&self, value: f64) -> f64 {
        let neg_span = self.neg_span();
        if value < 0.0 {
            if self.neg_values_count == 0 {
                return 0.0;
            }
            let offset = self.neg_end.abs().log10() - value.abs().log10();
            return offset.clamp(0.0, neg_span);
        }
        if value > 0.0 && self.pos_start > 0.0 && value >= self.pos_start {
            return neg_span + self.middle_width + (value.log10() - self.pos_start.log10());
        }
        if value > 0.0 {
            return neg_span + self.middle_width;
        }
        // Zero: bars on either side of it share the gap
        let has_neg = self.neg_values_count > 0;
        let has_pos = self.pos_start > 0.0;
        match (has_neg, has_pos) {
            (true, true) => neg_span + self.middle_width / 2.0,
            (true, false) => neg_span + self.middle_width,
            _ => neg_span,
        }
    }
}

/// Both X ranges of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeX {
    pub lin: LinRange,
    pub log: LogRange,
}

impl RangeX {
    /// Axis width under a scale
    pub fn width(&self, scale: ScaleMode) -> f64 {
        match scale {
            ScaleMode::Linear => self.lin.width(),
            ScaleMode::Logarithmic => self.log.width(),
        }
    }

    /// Axis position of a value under a scale
    pub fn position(&self, value: f64, scale: ScaleMode) -> f64 {
        match scale {
            ScaleMode::Linear => value - self.lin.min,
            ScaleMode::Logarithmic => self.log.position(value),
        }
    }

    /// Screen coordinate of a value on an axis `container_width` wide
    pub fn project(&self, value: f64, scale: ScaleMode, container_width: f64) -> f64 {
        self.position(value, scale) * screen_factor(self.width(scale), container_width)
    }
}

/// Logarithmic Y range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeY {
    pub min: f64,
    pub max: f64,
}

pub(crate) fn screen_factor(axis_width: f64, container_width: f64) -> f64 {
    if axis_width > 0.0 && axis_width.is_finite() {
        container_width / axis_width
    } else {
        0.0
    }
}

/// Linear and logarithmic X ranges of the bars
pub fn compute_range_x(bars: &[HistogramData], config: &HistogramConfig) -> RangeX {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return RangeX::default();
    };
    let lin = LinRange {
        min: first.partition[0],
        max: last.partition[1],
    };

    let mut bounds: Vec<f64> = bars.iter().flat_map(|b| b.partition).collect();
    bounds.sort_by(f64::total_cmp);
    bounds.dedup();

    let negatives: Vec<f64> = bounds.iter().copied().filter(|&b| b < 0.0).collect();
    let positives: Vec<f64> = bounds.iter().copied().filter(|&b| b > 0.0).collect();

    let log = LogRange {
        neg_start: negatives.last().copied().unwrap_or(0.0),
        neg_end: negatives.first().copied().unwrap_or(0.0),
        pos_start: positives.first().copied().unwrap_or(0.0),
        pos_end: positives.last().copied().unwrap_or(0.0),
        neg_values_count: negatives.len(),
        pos_values_count: bounds.len() - negatives.len(),
        middle_width: if bars.iter().any(HistogramData::touches_zero) {
            config.middle_width
        } else {
            0.0
        },
    };

    debug!(
        bars = bars.len(),
        neg_values = log.neg_values_count,
        pos_values = log.pos_values_count,
        gap = log.middle_width,
        "computed x range"
    );
    RangeX { lin, log }
}

/// Largest density, 0 without bars
pub fn compute_range_y_linear(bars: &[HistogramData]) -> f64 {
    bars.iter().map(|b| b.density).fold(0.0, f64::max)
}

/// Range of `ln(density)` over the bars with non-zero density
///
/// With a single non-zero bar the minimum is 0; with none the range is
/// `{0, 0}`.
pub fn compute_range_y_log(bars: &[HistogramData]) -> RangeY {
    let logs: Vec<f64> = bars
        .iter()
        .filter(|b| b.density > 0.0)
        .map(|b| b.density.ln())
        .collect();
    match logs.as_slice() {
        [] => RangeY::default(),
        [only] => RangeY { min: 0.0, max: *only },
        _ => RangeY {
            min: logs.iter().copied().fold(f64::INFINITY, f64::min),
            max: logs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bars(bounds: &[f64]) -> Vec<HistogramData> {
        bounds
            .windows(2)
            .map(|w| HistogramData::new([w[0], w[1]], 1.0, 10.0))
            .collect()
    }

    #[test]
    fn test_positive_range() {
        let range = compute_range_x(&bars(&[1.0, 10.0, 100.0]), &HistogramConfig::default());
        assert_eq!(range.lin, LinRange { min: 1.0, max: 100.0 });
        assert_eq!(range.log.neg_values_count, 0);
        assert_eq!(range.log.neg_start, 0.0);
        assert_eq!(range.log.pos_values_count, 3);
        assert_eq!(range.log.middle_width, 0.0);
        assert_relative_eq!(range.log.width(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(range.log.position(10.0), 1.0);
    }

    #[test]
    fn test_mixed_sign_range() {
        let range = compute_range_x(
            &bars(&[-100.0, -10.0, -1.0, 1.0, 10.0, 1000.0]),
            &HistogramConfig::default(),
        );
        let log = range.log;
        assert_eq!((log.neg_start, log.neg_end), (-1.0, -100.0));
        assert_eq!((log.pos_start, log.pos_end), (1.0, 1000.0));
        assert_eq!((log.neg_values_count, log.pos_values_count), (3, 3));
        assert_eq!(log.middle_width, 1.2);
        assert_relative_eq!(log.width(), 6.2, epsilon = 1e-12);
        assert_relative_eq!(log.position(-100.0), 0.0);
        assert_relative_eq!(log.position(-10.0), 1.0);
        assert_relative_eq!(log.position(-1.0), 2.0);
        assert_relative_eq!(log.position(1.0), 3.2);
        assert_relative_eq!(log.position(1000.0), 6.2, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_bound() {
        let range = compute_range_x(&bars(&[-10.0, -1.0, 0.0, 1.0, 10.0]), &HistogramConfig::default());
        assert_eq!(range.log.pos_values_count, 3);
        assert_relative_eq!(range.log.position(0.0), 1.6);
        assert_relative_eq!(range.log.width(), 3.2);

        let nonneg = compute_range_x(&bars(&[0.0, 1.0, 10.0]), &HistogramConfig::default());
        assert_eq!(nonneg.log.position(0.0), 0.0);
        assert_relative_eq!(nonneg.log.position(1.0), 1.2);

        let nonpos = compute_range_x(&bars(&[-10.0, -1.0, 0.0]), &HistogramConfig::default());
        assert_relative_eq!(nonpos.log.position(0.0), 2.2);
        assert_relative_eq!(nonpos.log.width(), 2.2);
    }

    #[test]
    fn test_empty_range() {
        let range = compute_range_x(&[], &HistogramConfig::default());
        assert_eq!(range, RangeX::default());
        assert_eq!(range.project(5.0, ScaleMode::Linear, 100.0), 0.0);
    }

    #[test]
    fn test_range_y() {
        let data = vec![
            HistogramData::new([0.0, 1.0], 5.0, 10.0),
            HistogramData::new([1.0, 2.0], 0.0, 10.0),
            HistogramData::new([2.0, 4.0], 5.0, 10.0),
        ];
        assert_relative_eq!(compute_range_y_linear(&data), 0.5);
        let log = compute_range_y_log(&data);
        assert_relative_eq!(log.min, 0.25_f64.ln());
        assert_relative_eq!(log.max, 0.5_f64.ln());

        let single = compute_range_y_log(&data[..2]);
        assert_eq!(single.min, 0.0);
        assert_relative_eq!(single.max, 0.5_f64.ln());

        assert_eq!(compute_range_y_log(&data[1..2]), RangeY::default());
        assert_eq!(compute_range_y_linear(&[]), 0.0);
    }
}
