//! Folding aggregation of a frequency table
//!
//! Each raw cell is mapped to its folded coordinates through the axis
//! groupings and summed there. Marginals and statistics are then recomputed
//! from the folded counts; probabilities are never summed across members.

use crate::grouping::AxisGrouping;
use crate::mode::{CellStats, MatrixMode};
use crate::table::{FrequencyTable, RawCell};
use covis_core::utils::finite_min_max;
use covis_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Aggregation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationConfig {
    /// Raw cell count above which the `parallel` feature splits the work
    pub parallel_threshold: usize,
    /// Emit every folded coordinate, including empty ones
    pub keep_empty_cells: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 50_000,
            keep_empty_cells: false,
        }
    }
}

impl AggregationConfig {
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn with_empty_cells(mut self, keep: bool) -> Self {
        self.keep_empty_cells = keep;
        self
    }
}

/// One folded cell, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    /// Display group index on each axis
    pub axis_indices: Vec<usize>,
    pub frequency: f64,
    pub stats: CellStats,
}

impl CellRecord {
    /// Display value of the cell for a mode
    pub fn value(&self, mode: MatrixMode) -> f64 {
        self.stats.value(mode, self.frequency)
    }
}

/// Value range of one mode over a folded matrix, for color scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub mode: MatrixMode,
    pub min: f64,
    pub max: f64,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMatrix {
    /// Display group count on each axis
    pub shape: Vec<usize>,
    /// Folded marginal of every display group, per axis
    pub marginals: Vec<Vec<f64>>,
    pub total_frequency: f64,
    /// Cells in row-major order of their display coordinates
    pub cells: Vec<CellRecord>,
}

impl AggregatedMatrix {
    /// Display values of every cell for a mode
    pub fn values(&self, mode: MatrixMode) -> Vec<f64> {
        self.cells.iter().map(|cell| cell.value(mode)).collect()
    }

    /// Min and max of a mode over the cells, `None` when no finite value exists
    pub fn summary(&self, mode: MatrixMode) -> Option<MatrixSummary> {
        finite_min_max(&self.values(mode)).map(|(min, max)| MatrixSummary { mode, min, max })
    }

    /// Cell at display coordinates
    pub fn cell(&self, axis_indices: &[usize]) -> Option<&CellRecord> {
        self.cells
            .binary_search_by(|cell| cell.axis_indices.as_slice().cmp(axis_indices))
            .ok()
            .map(|i| &self.cells[i])
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    frequency: f64,
    interest: f64,
}

type Folded = BTreeMap<Vec<usize>, Accumulator>;

/// Fold a table through one grouping per axis and compute every cell statistic
///
/// Cost is linear in the number of stored cells: each cell is resolved with
/// one lookup per axis, never by scanning group membership.
#[instrument(skip(table, groupings), fields(axes = table.n_axes(), raw_cells = table.len()))]
pub fn aggregate(
    table: &FrequencyTable,
    groupings: &[AxisGrouping],
    config: &AggregationConfig,
) -> Result<AggregatedMatrix> {
    check_groupings(table, groupings)?;

    let mut folded = fold_cells(table.cells(), groupings, config)?;
    if config.keep_empty_cells {
        fill_empty(&mut folded, groupings);
    }

    let mut marginals: Vec<Vec<f64>> = groupings.iter().map(|g| vec![0.0; g.len()]).collect();
    for (coords, acc) in &folded {
        for (axis, &group) in coords.iter().enumerate() {
            marginals[axis][group] += acc.frequency;
        }
    }
    let total_frequency: f64 = folded.values().map(|acc| acc.frequency).sum();

    let mut cell_marginals = Vec::with_capacity(groupings.len());
    let cells: Vec<CellRecord> = folded
        .into_iter()
        .map(|(axis_indices, acc)| {
            cell_marginals.clear();
            cell_marginals.extend(axis_indices.iter().enumerate().map(|(axis, &g)| marginals[axis][g]));
            CellRecord {
                stats: CellStats::compute(acc.frequency, total_frequency, &cell_marginals, acc.interest),
                axis_indices,
                frequency: acc.frequency,
            }
        })
        .collect();

    debug!(folded_cells = cells.len(), total_frequency, "aggregated matrix");

    Ok(AggregatedMatrix {
        shape: groupings.iter().map(AxisGrouping::len).collect(),
        marginals,
        total_frequency,
        cells,
    })
}

fn check_groupings(table: &FrequencyTable, groupings: &[AxisGrouping]) -> Result<()> {
    if groupings.len() != table.n_axes() {
        return Err(Error::size_mismatch(table.n_axes(), groupings.len(), "axis groupings"));
    }
    for (grouping, &leaves) in groupings.iter().zip(table.shape()) {
        if grouping.n_leaves() != leaves {
            return Err(Error::size_mismatch(leaves, grouping.n_leaves(), "grouping leaves"));
        }
    }
    Ok(())
}

fn fold_chunk(cells: &[RawCell], groupings: &[AxisGrouping]) -> Result<Folded> {
    let mut folded = Folded::new();
    for cell in cells {
        if cell.indices.len() != groupings.len() {
            return Err(Error::size_mismatch(groupings.len(), cell.indices.len(), "cell coordinates"));
        }
        let coords = cell
            .indices
            .iter()
            .zip(groupings)
            .enumerate()
            .map(|(axis, (&leaf, grouping))| {
                grouping.group_of(leaf).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "leaf {leaf} on axis {axis} is outside a grouping of {} leaves",
                        grouping.n_leaves()
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        let acc = folded.entry(coords).or_default();
        acc.frequency += cell.frequency;
        acc.interest += cell.interest;
    }
    Ok(folded)
}

#[cfg(not(feature = "parallel"))]
fn fold_cells(cells: &[RawCell], groupings: &[AxisGrouping], _config: &AggregationConfig) -> Result<Folded> {
    fold_chunk(cells, groupings)
}

#[cfg(feature = "parallel")]
fn fold_cells(cells: &[RawCell], groupings: &[AxisGrouping], config: &AggregationConfig) -> Result<Folded> {
    use rayon::prelude::*;

    if cells.len() <= config.parallel_threshold {
        return fold_chunk(cells, groupings);
    }
    let chunk_size = cells.len().div_ceil(rayon::current_num_threads()).max(1);
    let partials = cells
        .par_chunks(chunk_size)
        .map(|chunk| fold_chunk(chunk, groupings))
        .collect::<Result<Vec<Folded>>>()?;

    // Merge in chunk order so the result does not depend on scheduling
    let mut merged = Folded::new();
    for partial in partials {
        for (coords, acc) in partial {
            let slot = merged.entry(coords).or_default();
            slot.frequency += acc.frequency;
            slot.interest += acc.interest;
        }
    }
    Ok(merged)
}

fn fill_empty(folded: &mut Folded, groupings: &[AxisGrouping]) {
    if groupings.iter().any(AxisGrouping::is_empty) {
        return;
    }
    let mut coords = vec![0usize; groupings.len()];
    loop {
        folded.entry(coords.clone()).or_default();
        // Odometer increment, last axis fastest
        let mut axis = groupings.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            coords[axis] += 1;
            if coords[axis] < groupings[axis].len() {
                break;
            }
            coords[axis] = 0;
        }
    }
}
