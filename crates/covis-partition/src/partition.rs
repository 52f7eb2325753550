//! Ordered partition of one dimension and its merge operations
//!
//! Every operation returns a new partition; the input is never mutated.

use crate::types::{Interval, ValueGroup};
use covis_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A dimension's ordered partition
///
/// Deserialization goes through [`Partition::from_intervals`] and
/// [`Partition::from_value_groups`]: labels are recomputed and contiguity is
/// checked on every input path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPartition")]
pub enum Partition {
    /// Contiguous numeric intervals, optionally preceded by a missing-values interval
    Intervals(Vec<Interval>),
    /// Categorical value groups
    ValueGroups(Vec<ValueGroup>),
}

/// Serialized form of a partition, before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawPartition {
    Intervals(Vec<Interval>),
    ValueGroups(Vec<ValueGroup>),
}

impl TryFrom<RawPartition> for Partition {
    type Error = Error;

    fn try_from(raw: RawPartition) -> Result<Self> {
        match raw {
            RawPartition::Intervals(intervals) => Self::from_intervals(intervals),
            RawPartition::ValueGroups(groups) => Self::from_value_groups(groups),
        }
    }
}

impl Partition {
    /// Build an interval partition, recomputing labels and checking contiguity
    pub fn from_intervals(intervals: Vec<Interval>) -> Result<Self> {
        let partition = Self::Intervals(relabel(intervals));
        partition.validate()?;
        Ok(partition)
    }

    /// Build a value-group partition, recomputing labels from the values
    pub fn from_value_groups(groups: Vec<ValueGroup>) -> Result<Self> {
        for group in &groups {
            if group.values.len() != group.frequencies.len() {
                return Err(Error::size_mismatch(
                    group.values.len(),
                    group.frequencies.len(),
                    &format!("value group {}", group.label),
                ));
            }
        }
        Ok(Self::ValueGroups(
            groups
                .into_iter()
                .map(|g| ValueGroup::new(g.values, g.frequencies))
                .collect(),
        ))
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        match self {
            Self::Intervals(v) => v.len(),
            Self::ValueGroups(v) => v.len(),
        }
    }

    /// Check if the partition has no parts
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of the parts, in order
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Intervals(v) => v.iter().map(|i| i.label.as_str()).collect(),
            Self::ValueGroups(v) => v.iter().map(|g| g.label.as_str()).collect(),
        }
    }

    /// Frequency of each part, in order
    pub fn frequencies(&self) -> Vec<f64> {
        match self {
            Self::Intervals(v) => v.iter().map(|i| i.frequency).collect(),
            Self::ValueGroups(v) => v.iter().map(ValueGroup::frequency).collect(),
        }
    }

    /// Total frequency over all parts
    pub fn total_frequency(&self) -> f64 {
        self.frequencies().iter().sum()
    }

    /// Interval parts, if this is a numeric partition
    pub fn intervals(&self) -> Option<&[Interval]> {
        match self {
            Self::Intervals(v) => Some(v),
            Self::ValueGroups(_) => None,
        }
    }

    /// Value-group parts, if this is a categorical partition
    pub fn value_groups(&self) -> Option<&[ValueGroup]> {
        match self {
            Self::ValueGroups(v) => Some(v),
            Self::Intervals(_) => None,
        }
    }

    /// Check the contiguity invariant: `bounds[i][1] == bounds[i + 1][0]`
    ///
    /// The missing-values interval is skipped.
    pub fn validate(&self) -> Result<()> {
        if let Self::Intervals(intervals) = self {
            let bounded: Vec<[f64; 2]> = intervals.iter().filter_map(|i| i.bounds).collect();
            if let Some(bounds) = bounded.iter().find(|b| b[0].is_nan() || b[1].is_nan() || b[0] > b[1]) {
                return Err(Error::InvalidPartition(format!(
                    "interval bounds out of order: [{}, {}]",
                    bounds[0], bounds[1]
                )));
            }
            for pair in bounded.windows(2) {
                if pair[0][1] != pair[1][0] {
                    return Err(Error::InvalidPartition(format!(
                        "intervals are not contiguous: {} != {}",
                        pair[0][1], pair[1][0]
                    )));
                }
            }
            if intervals.iter().filter(|i| i.is_missing()).count() > 1 {
                return Err(Error::InvalidPartition(
                    "more than one missing-values interval".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Merge the interval at `at` with its right neighbour
    ///
    /// The boundary between them is removed; the merged bounds span both.
    pub fn merge_intervals(&self, at: usize) -> Result<Self> {
        let Self::Intervals(intervals) = self else {
            return Err(Error::InvalidPartition(
                "merge_intervals on a value-group partition".to_string(),
            ));
        };
        if at + 1 >= intervals.len() {
            return Err(Error::partition_index(at + 1, intervals.len()));
        }
        let mut merged = Vec::with_capacity(intervals.len() - 1);
        merged.extend_from_slice(&intervals[..at]);
        merged.push(intervals[at].merged_with(&intervals[at + 1]));
        merged.extend_from_slice(&intervals[at + 2..]);
        trace!(at, parts = merged.len(), "merged intervals");
        Ok(Self::Intervals(relabel(merged)))
    }

    /// Merge two value groups into one
    ///
    /// Values and frequencies of `b` are appended to those of `a`; the merged
    /// group takes the lower of the two slots and the other slot is dropped.
    pub fn merge_value_groups(&self, a: usize, b: usize) -> Result<Self> {
        let Self::ValueGroups(groups) = self else {
            return Err(Error::InvalidPartition(
                "merge_value_groups on an interval partition".to_string(),
            ));
        };
        for idx in [a, b] {
            if idx >= groups.len() {
                return Err(Error::partition_index(idx, groups.len()));
            }
        }
        if a == b {
            return Err(Error::InvalidPartition(format!(
                "cannot merge group {a} with itself"
            )));
        }
        let merged_group = groups[a].merged_with(&groups[b]);
        let (keep, drop) = (a.min(b), a.max(b));
        let mut merged = groups.clone();
        merged[keep] = merged_group;
        merged.remove(drop);
        trace!(a, b, parts = merged.len(), "merged value groups");
        Ok(Self::ValueGroups(merged))
    }

    /// Merge two parts of either kind; intervals must be adjacent
    pub fn merge(&self, a: usize, b: usize) -> Result<Self> {
        match self {
            Self::Intervals(_) => {
                let (lo, hi) = (a.min(b), a.max(b));
                if hi != lo + 1 {
                    return Err(Error::InvalidPartition(format!(
                        "intervals {lo} and {hi} are not adjacent"
                    )));
                }
                self.merge_intervals(lo)
            }
            Self::ValueGroups(_) => self.merge_value_groups(a, b),
        }
    }

    /// Fold the partition onto groups of original part indexes
    ///
    /// `groups` holds, for each new part in display order, the original part
    /// indexes it covers. Every original part must be covered exactly once.
    /// Interval groups must be contiguous index runs.
    pub fn regroup(&self, groups: &[Vec<usize>]) -> Result<Self> {
        let n = self.len();
        let mut seen = vec![false; n];
        for &idx in groups.iter().flatten() {
            if idx >= n {
                return Err(Error::partition_index(idx, n));
            }
            if seen[idx] {
                return Err(Error::InvalidPartition(format!(
                    "part {idx} appears in more than one group"
                )));
            }
            seen[idx] = true;
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(Error::InvalidPartition(format!(
                "part {missing} is not covered by any group"
            )));
        }

        match self {
            Self::Intervals(intervals) => {
                let mut out = Vec::with_capacity(groups.len());
                for group in groups {
                    let mut sorted = group.clone();
                    sorted.sort_unstable();
                    if sorted.windows(2).any(|w| w[1] != w[0] + 1) {
                        return Err(Error::InvalidPartition(format!(
                            "interval group {sorted:?} is not contiguous"
                        )));
                    }
                    let Some((&first, rest)) = sorted.split_first() else {
                        return Err(Error::InvalidPartition("empty interval group".to_string()));
                    };
                    let merged = rest
                        .iter()
                        .fold(intervals[first].clone(), |acc, &i| acc.merged_with(&intervals[i]));
                    out.push(merged);
                }
                Ok(Self::Intervals(relabel(out)))
            }
            Self::ValueGroups(value_groups) => {
                let mut out = Vec::with_capacity(groups.len());
                for group in groups {
                    let Some((&first, rest)) = group.split_first() else {
                        return Err(Error::InvalidPartition("empty value group".to_string()));
                    };
                    let merged = rest
                        .iter()
                        .fold(value_groups[first].clone(), |acc, &i| acc.merged_with(&value_groups[i]));
                    out.push(merged);
                }
                Ok(Self::ValueGroups(out))
            }
        }
    }
}

// Recompute labels; the first bounded interval gets the closed lower bracket
fn relabel(mut intervals: Vec<Interval>) -> Vec<Interval> {
    let mut first = true;
    for interval in &mut intervals {
        interval.label = Interval::format_label(interval.bounds, interval.includes_missing, first);
        if interval.bounds.is_some() {
            first = false;
        }
    }
    intervals
}
