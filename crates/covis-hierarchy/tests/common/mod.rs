//! Shared fixtures for hierarchy integration tests

use covis_core::Cluster;

/// Build a binary hierarchy by agglomerating adjacent clusters
///
/// Merge `k` (1-based) joins the adjacent pair at `choices[k - 1] % (len - 1)`
/// and gets hierarchical rank `n_leaves - k`, so the last merge is the root
/// with rank 1 and every parent ranks before its children.
pub fn binary_hierarchy(prefix: &str, n_leaves: usize, choices: &[usize]) -> Vec<Cluster> {
    assert!(n_leaves >= 1);
    let mut names: Vec<String> = (0..n_leaves).map(|i| format!("{prefix}L{i}")).collect();
    let mut parents: Vec<String> = vec![String::new(); n_leaves];
    let mut ranks: Vec<usize> = (0..n_leaves).map(|i| n_leaves + i).collect();
    let mut frontier: Vec<usize> = (0..n_leaves).collect();

    for k in 1..n_leaves {
        let at = choices.get(k - 1).copied().unwrap_or(0) % (frontier.len() - 1);
        let id = names.len();
        names.push(format!("{prefix}N{k}"));
        parents.push(String::new());
        ranks.push(n_leaves - k);
        parents[frontier[at]] = names[id].clone();
        parents[frontier[at + 1]] = names[id].clone();
        frontier.splice(at..at + 2, [id]);
    }

    names
        .into_iter()
        .zip(parents)
        .zip(ranks)
        .enumerate()
        .map(|(id, ((name, parent_name), rank))| Cluster {
            name,
            parent_name,
            is_leaf: id < n_leaves,
            rank,
            frequency: 1.0,
            interest: 0.0,
            hierarchical_level: 0.0,
            hierarchical_rank: rank as f64,
        })
        .collect()
}
