//! Histogram bars built from a numeric partition

use crate::config::HistogramConfig;
use covis_partition::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One interval of a discretization, with its density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramData {
    /// Interval bounds `[lower, upper]`
    pub partition: [f64; 2],
    pub frequency: f64,
    /// `frequency / (width * total)`, 0 for zero width or zero total
    pub density: f64,
    /// `frequency / total`
    pub probability: f64,
}

impl HistogramData {
    /// Create a bar, computing density and probability against `total`
    pub fn new(partition: [f64; 2], frequency: f64, total: f64) -> Self {
        let width = partition[1] - partition[0];
        let density = if width > 0.0 && total > 0.0 {
            frequency / (width * total)
        } else {
            0.0
        };
        let probability = if total > 0.0 { frequency / total } else { 0.0 };
        Self {
            partition,
            frequency,
            density,
            probability,
        }
    }

    /// Interval width
    pub fn width(&self) -> f64 {
        self.partition[1] - self.partition[0]
    }

    /// Whether the interval touches or contains zero
    pub fn touches_zero(&self) -> bool {
        self.partition[0] <= 0.0 && self.partition[1] >= 0.0
    }

    /// Bars of a numeric partition, plus the missing-value bin if any
    ///
    /// Densities and probabilities use the total frequency of all intervals,
    /// the missing one included.
    pub fn from_intervals(intervals: &[Interval], config: &HistogramConfig) -> Histogram {
        let total: f64 = intervals.iter().map(|i| i.frequency).sum();
        let mut bars = Vec::with_capacity(intervals.len());
        let mut missing: Option<MissingBin> = None;
        for interval in intervals {
            match interval.bounds {
                Some(bounds) => bars.push(Self::new(bounds, interval.frequency, total)),
                None => {
                    let bin = missing.get_or_insert_with(|| MissingBin {
                        label: config.missing_label.clone(),
                        frequency: 0.0,
                        probability: 0.0,
                    });
                    bin.frequency += interval.frequency;
                    bin.probability = if total > 0.0 { bin.frequency / total } else { 0.0 };
                }
            }
        }
        Histogram {
            bars,
            missing,
            total_frequency: total,
        }
    }
}

impl fmt::Display for HistogramData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}]: frequency={}, density={:.3}",
            self.partition[0], self.partition[1], self.frequency, self.density
        )
    }
}

/// Frequency of the values with no interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingBin {
    pub label: String,
    pub frequency: f64,
    pub probability: f64,
}

/// Bars of one numeric dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub bars: Vec<HistogramData>,
    pub missing: Option<MissingBin>,
    pub total_frequency: f64,
}

impl Histogram {
    /// Number of bars, missing bin excluded
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if there is no bar
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest density over the bars
    pub fn max_density(&self) -> f64 {
        self.bars.iter().map(|b| b.density).fold(0.0, f64::max)
    }
}

/// Render geometry of one bar
///
/// `lin_*` and `log_*` are in axis units for both scales; `x` and `width`
/// are the screen projection under the selected scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBar {
    pub partition: [f64; 2],
    pub lin_x: f64,
    pub lin_w: f64,
    pub log_x: f64,
    pub log_w: f64,
    pub x: f64,
    pub width: f64,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density() {
        let bar = HistogramData::new([0.0, 2.0], 10.0, 40.0);
        assert_relative_eq!(bar.density, 0.125);
        assert_relative_eq!(bar.probability, 0.25);
        assert_eq!(HistogramData::new([1.0, 1.0], 10.0, 40.0).density, 0.0);
        assert_eq!(HistogramData::new([0.0, 1.0], 0.0, 0.0).probability, 0.0);
    }

    #[test]
    fn test_from_intervals_with_missing() {
        let intervals = vec![
            Interval::missing(5.0),
            Interval::new([0.0, 1.0], 10.0),
            Interval::new([1.0, 5.0], 25.0),
        ];
        let histogram = HistogramData::from_intervals(&intervals, &HistogramConfig::default());
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.total_frequency, 40.0);
        let missing = histogram.missing.as_ref().unwrap();
        assert_eq!(missing.label, "Missing");
        assert_relative_eq!(missing.probability, 0.125);
        assert_relative_eq!(histogram.bars[1].density, 25.0 / (4.0 * 40.0));
        assert_relative_eq!(histogram.max_density(), 0.25);

        let total: f64 = histogram.bars.iter().map(|b| b.probability).sum::<f64>() + missing.probability;
        assert_relative_eq!(total, 1.0);
    }

    #[test]
    fn test_touches_zero() {
        assert!(HistogramData::new([-1.0, 1.0], 1.0, 1.0).touches_zero());
        assert!(HistogramData::new([0.0, 1.0], 1.0, 1.0).touches_zero());
        assert!(HistogramData::new([-1.0, 0.0], 1.0, 1.0).touches_zero());
        assert!(!HistogramData::new([0.5, 1.0], 1.0, 1.0).touches_zero());
    }
}
