//! Property tests over fold levels of the fixture session

mod common;

use covis::{CollapseSet, MatrixMode};
use proptest::prelude::*;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

proptest! {
    #[test]
    fn prop_conservation(target in 0usize..12) {
        init_tracing();
        let session = common::session();
        let view = session.fold(target).unwrap();
        let folded: f64 = view.values(MatrixMode::Frequency).iter().sum();
        prop_assert_eq!(folded, session.table().total_frequency());
        for partition in &view.partitions {
            prop_assert_eq!(partition.total_frequency(), 150.0);
        }
        prop_assert_eq!(view.matrix.shape.iter().sum::<usize>(), view.level);
    }

    #[test]
    fn prop_fold_unfold_restores_table(target in 0usize..12) {
        let session = common::session();
        let (_, max) = session.level_bounds();
        let folded = session.fold(target).unwrap();
        let unfolded = session.refold(&folded.collapse_sets, max).unwrap();
        prop_assert!(unfolded.collapse_sets.iter().all(CollapseSet::is_empty));
        prop_assert_eq!(unfolded.matrix.cells.len(), session.table().len());
        for cell in &unfolded.matrix.cells {
            prop_assert_eq!(cell.frequency, session.table().frequency_at(&cell.axis_indices));
        }
        prop_assert_eq!(&unfolded.partitions, session.partitions());
    }

    #[test]
    fn prop_views_are_deterministic(target in 0usize..12) {
        let session = common::session();
        let first = session.fold(target).unwrap();
        let second = session.fold(target).unwrap();
        prop_assert_eq!(&first, &second);
        let bits = |values: Vec<f64>| values.into_iter().map(f64::to_bits).collect::<Vec<_>>();
        for mode in MatrixMode::ALL {
            prop_assert_eq!(bits(first.values(mode)), bits(second.values(mode)));
        }
    }

    #[test]
    fn prop_closure_idempotent(target in 0usize..12) {
        let session = common::session();
        let view = session.fold(target).unwrap();
        for (tree, set) in session.trees().iter().zip(&view.collapse_sets) {
            let root = tree.root().id;
            prop_assert_eq!(tree.collect_leaf_closure(root, set), tree.collect_leaf_closure(root, set));
        }
    }
}
