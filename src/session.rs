//! A loaded coclustering and its fold states
//!
//! [`CoclusteringSession`] owns the immutable inputs (trees, unfolded
//! partitions, unfolded table). Every fold produces a fresh [`SessionView`];
//! nothing in the session changes after construction.

use covis_core::{Cluster, DimensionKind, Error, Result};
use covis_hierarchy::{CollapseSet, CollapseSnapshot, HierarchyFolder, HierarchyTree, TreeNode};
use covis_histogram::{Histogram, HistogramConfig, HistogramData};
use covis_matrix::{
    aggregate, AggregatedMatrix, AggregationConfig, AggregationRequest, AxisGrouping,
    FrequencyTable, MatrixMode,
};
use covis_partition::Partition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// One dimension as read from a report: its clusters and unfolded partition
///
/// Partition parts are in leaf order: part `i` is the leaf with matrix index `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub name: String,
    pub clusters: Vec<Cluster>,
    pub partition: Partition,
}

impl Dimension {
    pub fn new(name: impl Into<String>, clusters: Vec<Cluster>, partition: Partition) -> Self {
        Self {
            name: name.into(),
            clusters,
            partition,
        }
    }

    /// Numerical for intervals, categorical for value groups
    pub fn kind(&self) -> DimensionKind {
        match self.partition {
            Partition::Intervals(_) => DimensionKind::Numerical,
            Partition::ValueGroups(_) => DimensionKind::Categorical,
        }
    }
}

/// Everything the UI renders for one fold state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// Visible leaves summed over dimensions
    pub level: usize,
    pub collapse_sets: Vec<CollapseSet>,
    /// Folded partition of each dimension
    pub partitions: Vec<Partition>,
    /// Displayed cluster names of each axis
    pub axis_names: Vec<Vec<String>>,
    pub matrix: AggregatedMatrix,
}

impl SessionView {
    /// Cell display values for a mode
    pub fn values(&self, mode: MatrixMode) -> Vec<f64> {
        self.matrix.values(mode)
    }
}

/// Trees, partitions and frequency table of one coclustering
#[derive(Debug, Clone)]
pub struct CoclusteringSession {
    trees: Vec<HierarchyTree>,
    partitions: Vec<Partition>,
    table: Arc<FrequencyTable>,
    config: AggregationConfig,
}

impl CoclusteringSession {
    /// Build every tree and check the partitions and table against them
    ///
    /// Dimension names must be unique; partitions are relabeled and checked
    /// for contiguity.
    #[instrument(skip(dimensions, table), fields(n_dimensions = dimensions.len()))]
    pub fn new(dimensions: Vec<Dimension>, table: FrequencyTable) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::InvalidInput("a coclustering needs at least one dimension".to_string()));
        }
        if table.n_axes() != dimensions.len() {
            return Err(Error::size_mismatch(dimensions.len(), table.n_axes(), "table axes"));
        }

        for (i, dimension) in dimensions.iter().enumerate() {
            if dimensions[..i].iter().any(|d| d.name == dimension.name) {
                return Err(Error::InvalidInput(format!(
                    "duplicate dimension name '{}'",
                    dimension.name
                )));
            }
        }

        let mut trees = Vec::with_capacity(dimensions.len());
        let mut partitions = Vec::with_capacity(dimensions.len());
        for (dimension, &axis_len) in dimensions.into_iter().zip(table.shape()) {
            let tree = HierarchyTree::build(&dimension.name, &dimension.clusters)?;
            // Variants built directly skip the constructors' checks
            let partition = match dimension.partition {
                Partition::Intervals(intervals) => Partition::from_intervals(intervals)?,
                Partition::ValueGroups(groups) => Partition::from_value_groups(groups)?,
            };
            if partition.len() != tree.leaf_count() {
                return Err(Error::size_mismatch(
                    tree.leaf_count(),
                    partition.len(),
                    &format!("partition of dimension '{}'", dimension.name),
                ));
            }
            if axis_len != tree.leaf_count() {
                return Err(Error::size_mismatch(
                    tree.leaf_count(),
                    axis_len,
                    &format!("table axis of dimension '{}'", dimension.name),
                ));
            }
            trees.push(tree);
            partitions.push(partition);
        }

        Ok(Self {
            trees,
            partitions,
            table: Arc::new(table),
            config: AggregationConfig::default(),
        })
    }

    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn trees(&self) -> &[HierarchyTree] {
        &self.trees
    }

    /// Unfolded partitions, one per dimension
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Index of a dimension by name
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.trees.iter().position(|t| t.dimension() == name)
    }

    pub fn folder(&self) -> HierarchyFolder<'_> {
        HierarchyFolder::new(&self.trees)
    }

    /// Valid slider range: `(number of dimensions, total leaves)`
    pub fn level_bounds(&self) -> (usize, usize) {
        self.folder().level_bounds()
    }

    /// Fold every hierarchy to `target` visible leaves, clamped to the valid range
    pub fn fold(&self, target: usize) -> Result<SessionView> {
        self.view(self.folder().fold_to_level(target))
    }

    /// Move from a current fold state to `target`, keeping manual collapses where possible
    pub fn refold(&self, current: &[CollapseSet], target: usize) -> Result<SessionView> {
        self.view(self.folder().refold(current, target)?)
    }

    /// Apply a saved snapshot as is
    pub fn restore(&self, snapshot: &CollapseSnapshot) -> Result<SessionView> {
        self.view(snapshot.restore(&self.trees)?)
    }

    /// Snapshot of a fold state, for saving
    pub fn snapshot(&self, collapse_sets: &[CollapseSet]) -> Result<CollapseSnapshot> {
        CollapseSnapshot::capture(&self.trees, collapse_sets)
    }

    /// Build the view of a fold state
    #[instrument(skip(self, collapse_sets))]
    pub fn view(&self, collapse_sets: Vec<CollapseSet>) -> Result<SessionView> {
        let groupings = self.groupings(&collapse_sets)?;
        let partitions = self
            .partitions
            .iter()
            .zip(&groupings)
            .map(|(partition, grouping)| partition.regroup(grouping.groups()))
            .collect::<Result<Vec<_>>>()?;
        let axis_names = groupings.iter().map(|g| g.names().to_vec()).collect();
        let level = groupings.iter().map(AxisGrouping::len).sum();
        let matrix = aggregate(&self.table, &groupings, &self.config)?;

        debug!(level, cells = matrix.cells.len(), "built session view");
        Ok(SessionView {
            level,
            collapse_sets,
            partitions,
            axis_names,
            matrix,
        })
    }

    /// Axis groupings of a fold state, one per dimension
    pub fn groupings(&self, collapse_sets: &[CollapseSet]) -> Result<Vec<AxisGrouping>> {
        if collapse_sets.len() != self.trees.len() {
            return Err(Error::size_mismatch(self.trees.len(), collapse_sets.len(), "collapse sets"));
        }
        self.trees
            .iter()
            .zip(collapse_sets)
            .map(|(tree, set)| AxisGrouping::from_tree(tree, set))
            .collect()
    }

    /// Work item for a background recompute of a fold state
    pub fn request(&self, collapse_sets: &[CollapseSet], mode: MatrixMode) -> Result<AggregationRequest> {
        Ok(AggregationRequest {
            table: Arc::clone(&self.table),
            groupings: self.groupings(collapse_sets)?,
            mode,
            config: self.config,
        })
    }

    /// Nodes shown by the tree widget of a dimension
    pub fn visible_nodes(&self, dimension: usize, collapse: &CollapseSet) -> Result<Vec<&TreeNode>> {
        let tree = self.tree(dimension)?;
        collapse.validate(tree)?;
        Ok(tree.visible_nodes(collapse))
    }

    /// Histogram of a numerical dimension under a fold state, `None` for categorical ones
    pub fn histogram(
        &self,
        dimension: usize,
        collapse: &CollapseSet,
        config: &HistogramConfig,
    ) -> Result<Option<Histogram>> {
        let tree = self.tree(dimension)?;
        let grouping = AxisGrouping::from_tree(tree, collapse)?;
        let folded = self.partitions[dimension].regroup(grouping.groups())?;
        Ok(folded
            .intervals()
            .map(|intervals| HistogramData::from_intervals(intervals, config)))
    }

    fn tree(&self, dimension: usize) -> Result<&HierarchyTree> {
        self.trees.get(dimension).ok_or_else(|| {
            Error::InvalidInput(format!(
                "dimension {dimension} out of range for {} dimensions",
                self.trees.len()
            ))
        })
    }
}
