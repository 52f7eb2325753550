//! Sparse N-dimensional frequency tables
//!
//! Coclustering matrices are stored the way reports store them: a list of the
//! non-empty cells, each addressed by one leaf index per axis.

use covis_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One non-empty cell of the unfolded table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCell {
    /// Leaf index on each axis
    pub indices: Vec<usize>,
    pub frequency: f64,
    /// Upstream cell interest, additive under folding
    #[serde(default)]
    pub interest: f64,
}

/// Unfolded frequency table over the leaves of every axis
///
/// Deserialization goes through [`FrequencyTable::from_cells`], so a table
/// read from a report is checked like one built in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct FrequencyTable {
    shape: Vec<usize>,
    cells: Vec<RawCell>,
}

/// Serialized form of a table, before validation
#[derive(Deserialize)]
struct RawTable {
    shape: Vec<usize>,
    cells: Vec<RawCell>,
}

impl TryFrom<RawTable> for FrequencyTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::from_cells(raw.shape, raw.cells)
    }
}

impl FrequencyTable {
    /// An empty table with `shape[axis]` leaves on each axis
    pub fn new(shape: Vec<usize>) -> Self {
        Self {
            shape,
            cells: Vec::new(),
        }
    }

    /// Build a table from sparse cells, checking every index against the shape
    pub fn from_cells(shape: Vec<usize>, cells: Vec<RawCell>) -> Result<Self> {
        let mut table = Self::new(shape);
        table.cells.reserve(cells.len());
        for cell in cells {
            table.push_cell(cell)?;
        }
        Ok(table)
    }

    /// Build a 2-D table from dense rows, skipping zero cells
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut table = Self::new(vec![rows.len(), n_cols]);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::size_mismatch(n_cols, row.len(), "dense matrix row"));
            }
            for (c, &frequency) in row.iter().enumerate() {
                if frequency != 0.0 {
                    table.push(vec![r, c], frequency, 0.0)?;
                }
            }
        }
        Ok(table)
    }

    /// Add a cell
    pub fn push(&mut self, indices: Vec<usize>, frequency: f64, interest: f64) -> Result<()> {
        self.push_cell(RawCell {
            indices,
            frequency,
            interest,
        })
    }

    fn push_cell(&mut self, cell: RawCell) -> Result<()> {
        if cell.indices.len() != self.shape.len() {
            return Err(Error::size_mismatch(
                self.shape.len(),
                cell.indices.len(),
                "cell coordinates",
            ));
        }
        for (axis, (&index, &len)) in cell.indices.iter().zip(&self.shape).enumerate() {
            if index >= len {
                return Err(Error::InvalidInput(format!(
                    "cell index {index} out of range for axis {axis} with {len} leaves"
                )));
            }
        }
        if !cell.frequency.is_finite() || cell.frequency < 0.0 {
            return Err(Error::InvalidInput(format!(
                "cell frequency must be finite and non-negative, got {}",
                cell.frequency
            )));
        }
        self.cells.push(cell);
        Ok(())
    }

    /// Number of leaves on each axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn n_axes(&self) -> usize {
        self.shape.len()
    }

    /// Stored cells, in insertion order
    pub fn cells(&self) -> &[RawCell] {
        &self.cells
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell is stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of all cell frequencies
    pub fn total_frequency(&self) -> f64 {
        self.cells.iter().map(|c| c.frequency).sum()
    }

    /// Per-leaf marginal frequencies of one axis
    pub fn marginals(&self, axis: usize) -> Vec<f64> {
        let mut marginals = vec![0.0; self.shape.get(axis).copied().unwrap_or(0)];
        for cell in &self.cells {
            if let Some(slot) = cell.indices.get(axis).and_then(|&i| marginals.get_mut(i)) {
                *slot += cell.frequency;
            }
        }
        marginals
    }

    /// Frequency stored at a coordinate, summing duplicates
    pub fn frequency_at(&self, indices: &[usize]) -> f64 {
        self.cells
            .iter()
            .filter(|c| c.indices == indices)
            .map(|c| c.frequency)
            .sum()
    }
}
