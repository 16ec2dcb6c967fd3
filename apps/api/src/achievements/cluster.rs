#![allow(dead_code)]

//! Cluster Builder: groups statements into duplicate clusters.
//!
//! Statements are graph nodes; an edge joins every pair scoring at or above
//! `DUPLICATE_THRESHOLD`. Clusters are the connected components, so grouping
//! is transitive: if A~B and B~C then A, B and C share a cluster even when A
//! and C alone fall short.
//!
//! O(n²) pair comparisons; callers bound n per document.

use petgraph::unionfind::UnionFind;

use crate::achievements::models::AchievementStatement;
use crate::achievements::similarity::{score_features, StatementFeatures};

/// Partitions `statements` into clusters of input indices.
///
/// Each cluster is sorted ascending; clusters are ordered by their earliest
/// member. Empty input gives no clusters.
pub fn cluster(statements: &[AchievementStatement]) -> Vec<Vec<usize>> {
    let features: Vec<StatementFeatures> = statements
        .iter()
        .map(|s| StatementFeatures::from_text(&s.text))
        .collect();
    cluster_features(&features)
}

pub(crate) fn cluster_features(features: &[StatementFeatures]) -> Vec<Vec<usize>> {
    let n = features.len();
    let mut sets: UnionFind<usize> = UnionFind::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if score_features(&features[i], &features[j]).is_duplicate() {
                sets.union(i, j);
            }
        }
    }

    // Slots are handed out in input order, so cluster order does not depend
    // on which member the forest picked as root.
    let mut slot_by_root: Vec<Option<usize>> = vec![None; n];
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for i in 0..n {
        let root = sets.find_mut(i);
        match slot_by_root[root] {
            Some(slot) => clusters[slot].push(i),
            None => {
                slot_by_root[root] = Some(clusters.len());
                clusters.push(vec![i]);
            }
        }
    }

    clusters
}
