//! Parts of a dimension partition and their textual labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for the interval holding missing values
pub const MISSING_LABEL: &str = "Missing";

/// Raw label the report uses for the missing-values interval
pub const RAW_MISSING_LABEL: &str = "*";

/// Maximum number of values spelled out in a value-group label
const GROUP_LABEL_VALUES: usize = 3;

/// One numeric interval of a discretization
///
/// `bounds` is `None` for the interval that only holds missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(default)]
    pub label: String,
    pub bounds: Option<[f64; 2]>,
    pub frequency: f64,
    /// Whether missing values were merged into this interval
    #[serde(default)]
    pub includes_missing: bool,
}

impl Interval {
    /// Create a bounded interval; the label is filled in by the owning partition
    pub fn new(bounds: [f64; 2], frequency: f64) -> Self {
        Self {
            label: String::new(),
            bounds: Some(bounds),
            frequency,
            includes_missing: false,
        }
    }

    /// Create the missing-values interval
    pub fn missing(frequency: f64) -> Self {
        Self {
            label: MISSING_LABEL.to_string(),
            bounds: None,
            frequency,
            includes_missing: true,
        }
    }

    /// Create an interval from the report's raw shape
    ///
    /// Empty bounds or the `*` label denote the missing-values interval.
    pub fn from_raw(label: &str, bounds: &[f64], frequency: f64) -> Self {
        match bounds {
            [lo, hi] if label != RAW_MISSING_LABEL => Self::new([*lo, *hi], frequency),
            _ => Self::missing(frequency),
        }
    }

    /// Whether this interval holds only missing values
    pub fn is_missing(&self) -> bool {
        self.bounds.is_none()
    }

    /// Width of the interval, 0 for the missing interval
    pub fn width(&self) -> f64 {
        self.bounds.map_or(0.0, |[lo, hi]| hi - lo)
    }

    /// Format the label of an interval
    ///
    /// `first` selects the closed lower bracket used by the first bounded
    /// interval of a partition: `[a;b]`, then `]a;b]`, `]-inf;b]`, `]a;+inf[`.
    pub fn format_label(bounds: Option<[f64; 2]>, includes_missing: bool, first: bool) -> String {
        let Some([lo, hi]) = bounds else {
            return MISSING_LABEL.to_string();
        };
        let lower = if lo == f64::NEG_INFINITY {
            "]-inf".to_string()
        } else if first {
            format!("[{lo}")
        } else {
            format!("]{lo}")
        };
        let upper = if hi == f64::INFINITY {
            "+inf[".to_string()
        } else {
            format!("{hi}]")
        };
        if includes_missing {
            format!("{MISSING_LABEL} U {lower};{upper}")
        } else {
            format!("{lower};{upper}")
        }
    }

    /// Merge two adjacent intervals, `self` on the left
    pub(crate) fn merged_with(&self, right: &Interval) -> Interval {
        let bounds = match (self.bounds, right.bounds) {
            (Some([lo, _]), Some([_, hi])) => Some([lo, hi]),
            (Some(b), None) | (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        Interval {
            label: String::new(),
            bounds,
            frequency: self.frequency + right.frequency,
            includes_missing: self.includes_missing || right.includes_missing,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (frequency={})", self.label, self.frequency)
    }
}

/// One group of categorical values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueGroup {
    #[serde(default)]
    pub label: String,
    pub values: Vec<String>,
    pub frequencies: Vec<f64>,
}

impl ValueGroup {
    /// Create a value group; the label is derived from the values
    pub fn new(values: Vec<String>, frequencies: Vec<f64>) -> Self {
        let label = Self::format_label(&values);
        Self {
            label,
            values,
            frequencies,
        }
    }

    /// Total frequency of the group
    pub fn frequency(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    /// Format a group label: `{a, b, c}`, with an ellipsis past three values
    pub fn format_label(values: &[String]) -> String {
        let shown: Vec<&str> = values
            .iter()
            .take(GROUP_LABEL_VALUES)
            .map(String::as_str)
            .collect();
        if values.len() > GROUP_LABEL_VALUES {
            format!("{{{}, ...}}", shown.join(", "))
        } else {
            format!("{{{}}}", shown.join(", "))
        }
    }

    pub(crate) fn merged_with(&self, other: &ValueGroup) -> ValueGroup {
        let mut values = self.values.clone();
        values.extend(other.values.iter().cloned());
        let mut frequencies = self.frequencies.clone();
        frequencies.extend_from_slice(&other.frequencies);
        ValueGroup::new(values, frequencies)
    }
}

impl fmt::Display for ValueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (frequency={})", self.label, self.frequency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_labels() {
        assert_eq!(Interval::format_label(Some([1.0, 2.5]), false, false), "]1;2.5]");
        assert_eq!(Interval::format_label(Some([1.0, 2.5]), false, true), "[1;2.5]");
        assert_eq!(
            Interval::format_label(Some([f64::NEG_INFINITY, 3.0]), false, true),
            "]-inf;3]"
        );
        assert_eq!(
            Interval::format_label(Some([3.0, f64::INFINITY]), false, false),
            "]3;+inf["
        );
        assert_eq!(Interval::format_label(None, true, true), "Missing");
        assert_eq!(
            Interval::format_label(Some([-0.5, 4.0]), true, true),
            "Missing U [-0.5;4]"
        );
    }

    #[test]
    fn test_interval_from_raw() {
        let missing = Interval::from_raw("*", &[], 12.0);
        assert!(missing.is_missing());
        assert_eq!(missing.label, "Missing");
        assert_eq!(missing.width(), 0.0);

        let bounded = Interval::from_raw("]1;2]", &[1.0, 2.0], 5.0);
        assert_eq!(bounded.bounds, Some([1.0, 2.0]));
        assert_eq!(bounded.width(), 1.0);
    }

    #[test]
    fn test_merge_missing_into_interval() {
        let missing = Interval::missing(4.0);
        let first = Interval::new([0.0, 1.0], 6.0);
        let merged = missing.merged_with(&first);
        assert_eq!(merged.bounds, Some([0.0, 1.0]));
        assert!(merged.includes_missing);
        assert_eq!(merged.frequency, 10.0);
    }

    #[test]
    fn test_value_group_label() {
        let values = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(ValueGroup::format_label(&values(&["a"])), "{a}");
        assert_eq!(ValueGroup::format_label(&values(&["a", "b", "c"])), "{a, b, c}");
        assert_eq!(
            ValueGroup::format_label(&values(&["a", "b", "c", "d"])),
            "{a, b, c, ...}"
        );
    }

    #[test]
    fn test_value_group_merge() {
        let a = ValueGroup::new(vec!["x".into(), "y".into()], vec![3.0, 1.0]);
        let b = ValueGroup::new(vec!["z".into()], vec![2.0]);
        let merged = a.merged_with(&b);
        assert_eq!(merged.values, vec!["x", "y", "z"]);
        assert_eq!(merged.frequencies, vec![3.0, 1.0, 2.0]);
        assert_eq!(merged.frequency(), 6.0);
        assert_eq!(merged.label, "{x, y, z}");
    }
}
