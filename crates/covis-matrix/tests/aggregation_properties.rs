//! Property tests for folding aggregation

use covis_matrix::{aggregate, AggregationConfig, AxisGrouping, FrequencyTable, MatrixMode};
use proptest::prelude::*;

/// Split `0..n` into contiguous groups at the given cut flags
fn contiguous_grouping(n: usize, cuts: &[bool]) -> AxisGrouping {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new()];
    for leaf in 0..n {
        if leaf > 0 && cuts.get(leaf).copied().unwrap_or(false) {
            groups.push(Vec::new());
        }
        groups.last_mut().unwrap().push(leaf);
    }
    let names = (0..groups.len()).map(|g| format!("g{g}")).collect();
    AxisGrouping::from_groups(names, groups, n).unwrap()
}

fn table_strategy() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<bool>, Vec<bool>)> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        (
            prop::collection::vec(prop::collection::vec(0u32..50, cols), rows)
                .prop_map(|m| m.into_iter().map(|r| r.into_iter().map(f64::from).collect()).collect()),
            prop::collection::vec(any::<bool>(), rows),
            prop::collection::vec(any::<bool>(), cols),
        )
    })
}

proptest! {
    #[test]
    fn prop_mass_is_conserved((dense, row_cuts, col_cuts) in table_strategy()) {
        let table = FrequencyTable::from_dense(&dense).unwrap();
        let groupings = vec![
            contiguous_grouping(dense.len(), &row_cuts),
            contiguous_grouping(dense[0].len(), &col_cuts),
        ];
        let matrix = aggregate(&table, &groupings, &AggregationConfig::default()).unwrap();
        let folded: f64 = matrix.values(MatrixMode::Frequency).iter().sum();
        // Integer counts sum exactly
        prop_assert_eq!(folded, table.total_frequency());
        prop_assert_eq!(matrix.total_frequency, table.total_frequency());
        for (axis, marginals) in matrix.marginals.iter().enumerate() {
            prop_assert_eq!(marginals.iter().sum::<f64>(), table.total_frequency(), "axis {}", axis);
        }
    }

    #[test]
    fn prop_aggregation_is_deterministic((dense, row_cuts, col_cuts) in table_strategy()) {
        let table = FrequencyTable::from_dense(&dense).unwrap();
        let groupings = vec![
            contiguous_grouping(dense.len(), &row_cuts),
            contiguous_grouping(dense[0].len(), &col_cuts),
        ];
        let config = AggregationConfig::default().with_empty_cells(true);
        let first = aggregate(&table, &groupings, &config).unwrap();
        let second = aggregate(&table, &groupings, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_probabilities_are_bounded((dense, row_cuts, col_cuts) in table_strategy()) {
        let table = FrequencyTable::from_dense(&dense).unwrap();
        let groupings = vec![
            contiguous_grouping(dense.len(), &row_cuts),
            contiguous_grouping(dense[0].len(), &col_cuts),
        ];
        let matrix = aggregate(&table, &groupings, &AggregationConfig::default()).unwrap();
        for cell in &matrix.cells {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&cell.stats.prob_cell));
            prop_assert!((0.0..=1.0 + 1e-12).contains(&cell.stats.prob_cell_reverse));
            prop_assert!(cell.stats.hellinger.abs() <= 1.0);
        }
        let mi: f64 = matrix.values(MatrixMode::MutualInfo).iter().sum();
        prop_assert!(mi > -1e-12);
    }
}

#[test]
fn test_three_axis_table() {
    let mut table = FrequencyTable::new(vec![2, 2, 2]);
    table.push(vec![0, 0, 0], 4.0, 0.0).unwrap();
    table.push(vec![1, 1, 1], 4.0, 0.0).unwrap();
    table.push(vec![0, 1, 0], 2.0, 0.0).unwrap();
    let groupings = vec![
        AxisGrouping::identity(2),
        AxisGrouping::identity(2),
        contiguous_grouping(2, &[false, false]),
    ];
    let matrix = aggregate(&table, &groupings, &AggregationConfig::default()).unwrap();
    assert_eq!(matrix.shape, vec![2, 2, 1]);
    assert_eq!(matrix.total_frequency, 10.0);
    let cell = matrix.cell(&[0, 0, 0]).unwrap();
    // expected = 6 * 4 * 10 / 10^2
    let ratio: f64 = 4.0 * 100.0 / (6.0 * 4.0 * 10.0);
    assert!((cell.stats.mutual_info - 0.4 * ratio.ln()).abs() < 1e-12);
}
