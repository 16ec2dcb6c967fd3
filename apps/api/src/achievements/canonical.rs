use std::collections::HashSet;

use crate::achievements::metrics::extract_metrics;
use crate::achievements::models::{AchievementStatement, DeduplicatedRecord, MetricToken};

/// Builds the output record for one cluster.
///
/// `members` must be non-empty and in original input order:
/// - text: the longest member (by characters); the earliest wins a tie
/// - sources: distinct tags in first-seen order
/// - metrics: distinct by raw string, first-seen order across members
pub fn select_canonical(members: &[&AchievementStatement]) -> DeduplicatedRecord {
    debug_assert!(!members.is_empty(), "a duplicate cluster is never empty");

    let mut canonical: Option<&AchievementStatement> = None;
    let mut best_len = 0usize;
    for &member in members {
        let len = member.text.chars().count();
        if canonical.is_none() || len > best_len {
            canonical = Some(member);
            best_len = len;
        }
    }

    let mut seen_sources: HashSet<&str> = HashSet::new();
    let sources: Vec<String> = members
        .iter()
        .filter(|m| seen_sources.insert(m.source.as_str()))
        .map(|m| m.source.clone())
        .collect();

    let mut metrics: Vec<MetricToken> = Vec::new();
    for member in members {
        for token in extract_metrics(&member.text) {
            if !metrics.iter().any(|m| m.raw == token.raw) {
                metrics.push(token);
            }
        }
    }

    DeduplicatedRecord {
        text: canonical.map(|c| c.text.clone()).unwrap_or_default(),
        sources,
        similar_count: members.len(),
        metrics,
    }
}
