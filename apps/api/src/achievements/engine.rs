#![allow(dead_code)]

//! Deduplication engine: composes normalization, metric extraction, scoring,
//! clustering and canonical selection into one stateless batch transform.

use tracing::debug;

use crate::achievements::canonical::select_canonical;
use crate::achievements::cluster::cluster_features;
use crate::achievements::models::{AchievementStatement, DedupSummary, DeduplicatedRecord};
use crate::achievements::similarity::{breakdown, SimilarityBreakdown, StatementFeatures};

/// Records plus the counts the service reports back.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub records: Vec<DeduplicatedRecord>,
    pub summary: DedupSummary,
}

/// Stateless deduplication service. Construct once and share freely; every
/// call allocates only its own working state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementDeduplicator;

impl AchievementDeduplicator {
    pub fn new() -> Self {
        Self
    }

    /// Collapses statements describing the same fact into one record each.
    ///
    /// Records come out in the order their earliest member appeared in the input.
    pub fn deduplicate(&self, statements: &[AchievementStatement]) -> Vec<DeduplicatedRecord> {
        self.deduplicate_with_summary(statements).records
    }

    pub fn deduplicate_with_summary(&self, statements: &[AchievementStatement]) -> DedupOutcome {
        let features: Vec<StatementFeatures> = statements
            .iter()
            .map(|s| StatementFeatures::from_text(&s.text))
            .collect();

        let clusters = cluster_features(&features);

        let records: Vec<DeduplicatedRecord> = clusters
            .iter()
            .map(|members| {
                let members: Vec<&AchievementStatement> =
                    members.iter().map(|&i| &statements[i]).collect();
                select_canonical(&members)
            })
            .collect();

        let summary = DedupSummary {
            input_count: statements.len(),
            record_count: records.len(),
            merged_count: statements.len() - records.len(),
        };

        debug!(
            input = summary.input_count,
            records = summary.record_count,
            merged = summary.merged_count,
            "Deduplicated achievement statements"
        );

        DedupOutcome { records, summary }
    }

    /// Pairwise score with its lexical and metric components.
    pub fn similarity(&self, a: &str, b: &str) -> SimilarityBreakdown {
        breakdown(a, b)
    }
}

/// Convenience wrapper over a default `AchievementDeduplicator`.
pub fn deduplicate(statements: &[AchievementStatement]) -> Vec<DeduplicatedRecord> {
    AchievementDeduplicator::new().deduplicate(statements)
}
