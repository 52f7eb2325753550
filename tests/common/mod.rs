//! Shared fixtures for covis integration tests

#![allow(dead_code)]

use covis::{
    Cluster, CoclusteringSession, Dimension, FrequencyTable, Interval, Partition, ValueGroup,
};

pub fn cluster(name: &str, parent: &str, leaf: bool, rank: usize, hierarchical_rank: f64) -> Cluster {
    Cluster {
        name: name.to_string(),
        parent_name: parent.to_string(),
        is_leaf: leaf,
        rank,
        frequency: 0.0,
        interest: 0.0,
        hierarchical_level: 0.0,
        hierarchical_rank,
    }
}

/// Numerical dimension: `A -> {A1 -> {a1, a2}, A2 -> {a3, a4}}`
pub fn age() -> Dimension {
    Dimension::new(
        "age",
        vec![
            cluster("A", "", false, 1, 1.0),
            cluster("A1", "A", false, 2, 2.0),
            cluster("A2", "A", false, 3, 3.0),
            cluster("a1", "A1", true, 4, 4.0),
            cluster("a2", "A1", true, 5, 5.0),
            cluster("a3", "A2", true, 6, 6.0),
            cluster("a4", "A2", true, 7, 7.0),
        ],
        Partition::from_intervals(vec![
            Interval::new([17.0, 25.0], 30.0),
            Interval::new([25.0, 35.0], 40.0),
            Interval::new([35.0, 50.0], 50.0),
            Interval::new([50.0, 90.0], 30.0),
        ])
        .unwrap(),
    )
}

/// Categorical dimension: `J -> {J1 -> {j1, j2}, j3}`
pub fn job() -> Dimension {
    Dimension::new(
        "job",
        vec![
            cluster("J", "", false, 1, 1.0),
            cluster("J1", "J", false, 2, 2.5),
            cluster("j1", "J1", true, 3, 4.5),
            cluster("j2", "J1", true, 4, 5.5),
            cluster("j3", "J", true, 5, 6.5),
        ],
        Partition::from_value_groups(vec![
            ValueGroup::new(vec!["clerk".into(), "sales".into()], vec![30.0, 20.0]),
            ValueGroup::new(vec!["farmer".into()], vec![40.0]),
            ValueGroup::new(vec!["manager".into(), "exec".into(), "owner".into(), "cto".into()], vec![25.0, 20.0, 10.0, 5.0]),
        ])
        .unwrap(),
    )
}

/// Joint frequencies of age x job leaves, total 150
pub fn table() -> FrequencyTable {
    FrequencyTable::from_dense(&[
        vec![20.0, 5.0, 5.0],
        vec![15.0, 10.0, 15.0],
        vec![10.0, 20.0, 20.0],
        vec![5.0, 5.0, 20.0],
    ])
    .unwrap()
}

pub fn session() -> CoclusteringSession {
    CoclusteringSession::new(vec![age(), job()], table()).unwrap()
}
