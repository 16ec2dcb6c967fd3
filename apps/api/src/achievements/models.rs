#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A single achievement sentence as extracted from one section of a résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatement {
    pub text: String,
    /// Opaque section tag, e.g. `experience@Acme`, `summary`, `achievements`.
    pub source: String,
}

impl AchievementStatement {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Percentage,
    Currency,
    Count,
}

/// A quantitative fact found in statement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricToken {
    /// Exact substring matched, e.g. `15%`, `$2.5M`, `8`.
    pub raw: String,
    pub kind: MetricKind,
    /// Scaled value: `$2.5M` → 2_500_000.0, `15%` → 0.15.
    pub normalized_value: f64,
}

impl MetricToken {
    /// Two tokens describe the same quantity when kind and scaled value agree.
    pub fn same_quantity(&self, other: &MetricToken) -> bool {
        if self.kind != other.kind {
            return false;
        }
        let scale = self.normalized_value.abs().max(other.normalized_value.abs()).max(1.0);
        (self.normalized_value - other.normalized_value).abs() <= scale * 1e-9
    }
}

/// One output row per duplicate cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeduplicatedRecord {
    /// Canonical representative: the longest member text.
    pub text: String,
    /// Distinct source tags in first-seen order.
    pub sources: Vec<String>,
    /// Number of input statements merged into this record (≥ 1).
    pub similar_count: usize,
    /// Distinct metrics (by raw string) across all members, first-seen order.
    pub metrics: Vec<MetricToken>,
}

impl DeduplicatedRecord {
    pub fn metric_strings(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.raw.clone()).collect()
    }
}

/// Aggregate counts for one deduplication call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupSummary {
    pub input_count: usize,
    pub record_count: usize,
    /// Statements folded into another record: `input_count - record_count`.
    pub merged_count: usize,
}
