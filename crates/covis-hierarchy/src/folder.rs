//! Rank-based folding of cluster hierarchies
//!
//! The unfold level is the number of displayed leaves summed over all
//! dimensions, in `[number of dimensions, total original leaves]`. Folding
//! one step collapses the least important foldable node across every
//! dimension: the highest `hierarchical_rank`, ties going to the lower `rank`.
//! A node is foldable when all its children are displayed as leaves.
//! Unfolding expands the most important collapsed node first, which undoes
//! the most recent fold.
//!
//! Folding never mutates its input: every operation returns new collapse
//! sets.

use crate::collapse::CollapseSet;
use crate::tree::{HierarchyTree, NodeId};
use covis_core::{Error, Result};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, instrument};

/// Priority of a node for folding; the greatest key folds first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FoldKey {
    hierarchical_rank: OrderedFloat<f64>,
    rank: Reverse<usize>,
    dimension: Reverse<usize>,
    node: Reverse<NodeId>,
}

/// Folding state of one tree
#[derive(Debug, Clone)]
struct TreeState {
    collapsed: Vec<bool>,
    visible: Vec<bool>,
    /// Internal, non-collapsed children of each expanded visible node; 0 for
    /// collapsed and hidden nodes, whose internal children start collapsed
    /// once they are expanded
    pending: Vec<usize>,
}

impl TreeState {
    fn new(tree: &HierarchyTree, collapse: &CollapseSet) -> Self {
        let n = tree.len();
        let mut collapsed = vec![false; n];
        let mut visible = vec![false; n];
        let mut stack = vec![tree.root().id];
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            visible[id] = true;
            if collapse.contains(&node.name) {
                collapsed[id] = true;
            } else {
                stack.extend(node.children.iter().copied());
            }
        }
        let pending = (0..n)
            .map(|id| {
                if !visible[id] || collapsed[id] {
                    return 0;
                }
                tree.node(id)
                    .children
                    .iter()
                    .filter(|&&c| !tree.node(c).is_leaf() && !collapsed[c])
                    .count()
            })
            .collect();
        Self {
            collapsed,
            visible,
            pending,
        }
    }

    fn foldable(&self, tree: &HierarchyTree, id: NodeId) -> bool {
        self.visible[id] && !self.collapsed[id] && !tree.node(id).is_leaf() && self.pending[id] == 0
    }

    fn expandable(&self, id: NodeId) -> bool {
        self.visible[id] && self.collapsed[id]
    }

    fn collapse_set(&self, tree: &HierarchyTree) -> CollapseSet {
        (0..tree.len())
            .filter(|&id| self.collapsed[id])
            .map(|id| tree.node(id).name.as_str())
            .collect()
    }
}

/// Incremental folder over the trees of all dimensions
struct FoldEngine<'a> {
    trees: &'a [HierarchyTree],
    states: Vec<TreeState>,
    fold_heap: BinaryHeap<FoldKey>,
    unfold_heap: BinaryHeap<Reverse<FoldKey>>,
    level: usize,
}

impl<'a> FoldEngine<'a> {
    fn new(trees: &'a [HierarchyTree], sets: &[CollapseSet]) -> Self {
        let states: Vec<TreeState> = trees
            .iter()
            .zip(sets)
            .map(|(tree, set)| TreeState::new(tree, set))
            .collect();
        let level = trees
            .iter()
            .zip(sets)
            .map(|(tree, set)| tree.visible_leaf_count(set))
            .sum();
        let mut engine = Self {
            trees,
            states,
            fold_heap: BinaryHeap::new(),
            unfold_heap: BinaryHeap::new(),
            level,
        };
        for (dim, tree) in trees.iter().enumerate() {
            for id in 0..tree.len() {
                let key = engine.key(dim, id);
                if engine.states[dim].foldable(tree, id) {
                    engine.fold_heap.push(key);
                } else if engine.states[dim].expandable(id) {
                    engine.unfold_heap.push(Reverse(key));
                }
            }
        }
        engine
    }

    fn key(&self, dim: usize, id: NodeId) -> FoldKey {
        let node = self.trees[dim].node(id);
        FoldKey {
            hierarchical_rank: OrderedFloat(node.hierarchical_rank),
            rank: Reverse(node.rank),
            dimension: Reverse(dim),
            node: Reverse(id),
        }
    }

    /// Collapse the next node; returns `false` when everything is folded
    fn fold_one(&mut self) -> bool {
        while let Some(key) = self.fold_heap.pop() {
            let (dim, id) = (key.dimension.0, key.node.0);
            let tree = &self.trees[dim];
            if !self.states[dim].foldable(tree, id) {
                continue;
            }
            let node = tree.node(id);
            let state = &mut self.states[dim];
            state.collapsed[id] = true;
            for &child in &node.children {
                state.visible[child] = false;
                state.collapsed[child] = false;
            }
            self.level -= node.children.len() - 1;
            if let Some(parent) = tree.parent(id) {
                state.pending[parent] -= 1;
                if state.pending[parent] == 0 {
                    let parent_key = self.key(dim, parent);
                    self.fold_heap.push(parent_key);
                }
            }
            self.unfold_heap.push(Reverse(key));
            return true;
        }
        false
    }

    /// Expand the next node; returns `false` when everything is unfolded
    fn unfold_one(&mut self) -> bool {
        while let Some(Reverse(key)) = self.unfold_heap.pop() {
            let (dim, id) = (key.dimension.0, key.node.0);
            if !self.states[dim].expandable(id) {
                continue;
            }
            let tree = &self.trees[dim];
            let node = tree.node(id);
            self.states[dim].collapsed[id] = false;
            self.states[dim].pending[id] = 0;
            for &child in &node.children {
                self.states[dim].visible[child] = true;
                if !tree.node(child).is_leaf() {
                    self.states[dim].collapsed[child] = true;
                    let child_key = self.key(dim, child);
                    self.unfold_heap.push(Reverse(child_key));
                }
            }
            self.level += node.children.len() - 1;
            if let Some(parent) = tree.parent(id) {
                self.states[dim].pending[parent] += 1;
            }
            self.fold_heap.push(key);
            return true;
        }
        false
    }

    fn into_sets(self) -> Vec<CollapseSet> {
        self.states
            .iter()
            .zip(self.trees)
            .map(|(state, tree)| state.collapse_set(tree))
            .collect()
    }
}

/// Folding operations over the trees of all dimensions
#[derive(Debug, Clone, Copy)]
pub struct HierarchyFolder<'a> {
    trees: &'a [HierarchyTree],
}

impl<'a> HierarchyFolder<'a> {
    /// Create a folder over the trees of all dimensions
    pub fn new(trees: &'a [HierarchyTree]) -> Self {
        Self { trees }
    }

    /// Valid unfold levels: `(number of dimensions, total original leaves)`
    pub fn level_bounds(&self) -> (usize, usize) {
        let max = self.trees.iter().map(HierarchyTree::leaf_count).sum();
        (self.trees.len(), max)
    }

    /// Current unfold level of a set of collapse sets
    pub fn unfold_level(&self, sets: &[CollapseSet]) -> Result<usize> {
        self.check_sets(sets)?;
        Ok(self
            .trees
            .iter()
            .zip(sets)
            .map(|(tree, set)| tree.visible_leaf_count(set))
            .sum())
    }

    /// Fold from the fully unfolded state down to `target` displayed leaves
    ///
    /// Out-of-range targets are clamped. With non-binary nodes a single fold
    /// can remove several leaves, in which case the result may land below the
    /// target.
    #[instrument(skip(self), fields(dimensions = self.trees.len()))]
    pub fn fold_to_level(&self, target: usize) -> Vec<CollapseSet> {
        let empty = vec![CollapseSet::new(); self.trees.len()];
        let mut engine = FoldEngine::new(self.trees, &empty);
        let target = self.clamp(target);
        while engine.level > target && engine.fold_one() {}
        debug!(target, level = engine.level, "folded hierarchies");
        engine.into_sets()
    }

    /// Move from the current collapse sets to `target` displayed leaves
    ///
    /// Folds or unfolds incrementally from `current`, so manual collapses the
    /// user made are kept as long as the target allows.
    #[instrument(skip(self, current), fields(dimensions = self.trees.len()))]
    pub fn refold(&self, current: &[CollapseSet], target: usize) -> Result<Vec<CollapseSet>> {
        self.check_sets(current)?;
        let mut engine = FoldEngine::new(self.trees, current);
        let target = self.clamp(target);
        if engine.level > target {
            while engine.level > target && engine.fold_one() {}
        } else {
            while engine.level < target && engine.unfold_one() {}
        }
        debug!(target, level = engine.level, "refolded hierarchies");
        Ok(engine.into_sets())
    }

    /// Fold one step; `None` when everything is already folded
    pub fn fold_step(&self, current: &[CollapseSet]) -> Result<Option<Vec<CollapseSet>>> {
        self.check_sets(current)?;
        let mut engine = FoldEngine::new(self.trees, current);
        Ok(engine.fold_one().then(|| engine.into_sets()))
    }

    /// Unfold one step; `None` when everything is already unfolded
    pub fn unfold_step(&self, current: &[CollapseSet]) -> Result<Option<Vec<CollapseSet>>> {
        self.check_sets(current)?;
        let mut engine = FoldEngine::new(self.trees, current);
        Ok(engine.unfold_one().then(|| engine.into_sets()))
    }

    fn clamp(&self, target: usize) -> usize {
        let (min, max) = self.level_bounds();
        target.clamp(min, max)
    }

    fn check_sets(&self, sets: &[CollapseSet]) -> Result<()> {
        if sets.len() != self.trees.len() {
            return Err(Error::size_mismatch(self.trees.len(), sets.len(), "collapse sets"));
        }
        for (tree, set) in self.trees.iter().zip(sets) {
            set.validate(tree)?;
        }
        Ok(())
    }
}
