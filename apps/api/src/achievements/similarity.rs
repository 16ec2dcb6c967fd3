#![allow(dead_code)]

//! Similarity Scorer: bounded [0, 1] score between two achievement statements.
//!
//! Two signals are combined:
//! 1. Lexical: Dice coefficient over comparison tokens (see `normalize::tokens`).
//!    Quantities are not tokens, so a shared `20%` never counts twice.
//! 2. Metric agreement: when both statements quantify something, a shared
//!    (kind, value) pair lifts the score toward 1.0 and a full mismatch
//!    suppresses it.
//!
//! Combined score:
//! - opposing direction (reduce vs increase) → `lexical * CONFLICT_PENALTY`
//! - agreement with lexical ≥ `AGREEMENT_MIN_LEXICAL`
//!   → `AGREEMENT_FLOOR + (1 - AGREEMENT_FLOOR) * lexical`
//! - conflict  → `lexical * CONFLICT_PENALTY`
//! - otherwise → `lexical`
//!
//! A shared metric only vouches for two statements whose wording already
//! overlaps on more than the verb: "Grew revenue by 20%" and "Grew headcount
//! by 20%" stay apart at lexical 0.5.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::metrics::extract_metrics;
use crate::achievements::models::{MetricKind, MetricToken};
use crate::achievements::normalize::{normalize, tokens, INCREASE, REDUCE};

/// Two statements are duplicates iff their similarity is at least this value.
pub const DUPLICATE_THRESHOLD: f64 = 0.85;

const AGREEMENT_FLOOR: f64 = 0.7;
const CONFLICT_PENALTY: f64 = 0.5;
const AGREEMENT_MIN_LEXICAL: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSignal {
    /// At least one side has no evidence-bearing metric.
    None,
    /// Both sides quantify something and share at least one quantity.
    Agreement,
    /// Both sides quantify something and share nothing.
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub score: f64,
    pub lexical: f64,
    pub metric_signal: MetricSignal,
    /// One side reduces what the other increases.
    pub opposing_direction: bool,
}

impl SimilarityBreakdown {
    pub fn is_duplicate(&self) -> bool {
        self.score >= DUPLICATE_THRESHOLD
    }

    fn zero() -> Self {
        Self {
            score: 0.0,
            lexical: 0.0,
            metric_signal: MetricSignal::None,
            opposing_direction: false,
        }
    }
}

/// Everything the scorer needs from one statement, computed once per statement.
#[derive(Debug, Clone)]
pub struct StatementFeatures {
    text: String,
    normalized: String,
    tokens: BTreeSet<String>,
    metrics: Vec<MetricToken>,
}

impl StatementFeatures {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            normalized: normalize(text),
            tokens: tokens(text).into_iter().collect(),
            metrics: extract_metrics(text),
        }
    }

    /// Metrics the scorer treats as evidence. Year-like counts ("in 2019")
    /// say when something happened, not how much.
    fn evidence(&self) -> impl Iterator<Item = &MetricToken> {
        self.metrics.iter().filter(|m| !is_year_like(m))
    }
}

/// Scores two raw statements. Symmetric; 1.0 for identical non-empty text;
/// 0.0 when either side is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    breakdown(a, b).score
}

pub fn is_duplicate(a: &str, b: &str) -> bool {
    breakdown(a, b).is_duplicate()
}

pub fn breakdown(a: &str, b: &str) -> SimilarityBreakdown {
    score_features(&StatementFeatures::from_text(a), &StatementFeatures::from_text(b))
}

/// Scores two pre-computed feature sets. This is what the cluster builder
/// calls for every pair.
pub fn score_features(a: &StatementFeatures, b: &StatementFeatures) -> SimilarityBreakdown {
    if a.text.is_empty() || b.text.is_empty() {
        return SimilarityBreakdown::zero();
    }

    let metric_signal = metric_signal(a, b);

    if a.text == b.text || (!a.normalized.is_empty() && a.normalized == b.normalized) {
        return SimilarityBreakdown {
            score: 1.0,
            lexical: 1.0,
            metric_signal,
            opposing_direction: false,
        };
    }

    let lexical = dice(&a.tokens, &b.tokens);
    let opposing_direction = opposing_direction(a, b);
    let combined = match metric_signal {
        _ if opposing_direction => lexical * CONFLICT_PENALTY,
        MetricSignal::Agreement if lexical >= AGREEMENT_MIN_LEXICAL => {
            AGREEMENT_FLOOR + (1.0 - AGREEMENT_FLOOR) * lexical
        }
        MetricSignal::Conflict => lexical * CONFLICT_PENALTY,
        MetricSignal::Agreement | MetricSignal::None => lexical,
    };

    SimilarityBreakdown {
        score: combined.clamp(0.0, 1.0),
        lexical,
        metric_signal,
        opposing_direction,
    }
}

fn opposing_direction(a: &StatementFeatures, b: &StatementFeatures) -> bool {
    let direction = |f: &StatementFeatures| {
        match (f.tokens.contains(REDUCE), f.tokens.contains(INCREASE)) {
            (true, false) => Some(REDUCE),
            (false, true) => Some(INCREASE),
            _ => None,
        }
    };
    matches!((direction(a), direction(b)), (Some(x), Some(y)) if x != y)
}

fn metric_signal(a: &StatementFeatures, b: &StatementFeatures) -> MetricSignal {
    let a_evidence: Vec<&MetricToken> = a.evidence().collect();
    let b_evidence: Vec<&MetricToken> = b.evidence().collect();

    if a_evidence.is_empty() || b_evidence.is_empty() {
        return MetricSignal::None;
    }

    let shared = a_evidence
        .iter()
        .any(|x| b_evidence.iter().any(|y| x.same_quantity(y)));

    if shared {
        MetricSignal::Agreement
    } else {
        MetricSignal::Conflict
    }
}

/// Dice coefficient `2|A∩B| / (|A|+|B|)`; 0.0 when either set is empty.
fn dice(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    2.0 * shared as f64 / (a.len() + b.len()) as f64
}

fn is_year_like(metric: &MetricToken) -> bool {
    metric.kind == MetricKind::Count
        && metric.raw.len() == 4
        && (1900.0..=2099.0).contains(&metric.normalized_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|i| format!("{prefix}{i}")).collect()
    }

    /// Builds a pair of metric-free statements with `total` tokens each,
    /// sharing the first `shared`. Dice = shared / total.
    fn crafted_pair(total: usize, shared: usize) -> (String, String) {
        let a = terms("term", 0..total).join(" ");
        let mut b = terms("term", 0..shared);
        b.extend(terms("other", shared..total));
        (a, b.join(" "))
    }

    const SAMPLES: &[&str] = &[
        "Reduced costs by 20%",
        "Decreased costs by 20%",
        "Completely different achievement",
        "Nothing similar here",
        "Increased revenue by $1M",
        "Boosted sales by $1M",
        "Led a team of 8 software engineers",
        "Managed 8 software developers in an agile environment",
        "Promoted to senior engineer in 2019",
        "?!",
        "",
    ];

    #[test]
    fn test_reflexive_for_non_empty_text() {
        for s in SAMPLES.iter().filter(|s| !s.is_empty()) {
            assert_eq!(similarity(s, s), 1.0, "similarity({s:?}, {s:?})");
        }
    }

    #[test]
    fn test_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(similarity(a, b), similarity(b, a), "pair {a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn test_bounded() {
        for a in SAMPLES {
            for b in SAMPLES {
                let score = similarity(a, b);
                assert!((0.0..=1.0).contains(&score), "score {score} for {a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn test_empty_is_never_duplicate() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("Reduced costs by 20%", ""), 0.0);
    }

    #[test]
    fn test_synonym_rewording_with_shared_percentage() {
        let b = breakdown("Reduced costs by 20%", "Decreased costs by 20%");
        assert_eq!(b.metric_signal, MetricSignal::Agreement);
        assert!(b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_unrelated_statements() {
        let score = similarity("Completely different achievement", "Nothing similar here");
        assert!(score < DUPLICATE_THRESHOLD, "score was {score}");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_shared_currency_lifts_reworded_pair() {
        let b = breakdown("Increased revenue by $1M", "Boosted sales by $1M");
        assert_eq!(b.metric_signal, MetricSignal::Agreement);
        assert!(b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_shared_headcount_with_partial_overlap() {
        let b = breakdown(
            "Led a team of 8 software engineers",
            "Managed 8 software developers in an agile environment",
        );
        // lead, software, engineer shared out of 4 / 5 → Dice 6/9
        assert!((b.lexical - 6.0 / 9.0).abs() < 1e-12, "lexical was {}", b.lexical);
        assert_eq!(b.metric_signal, MetricSignal::Agreement);
        assert!(b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_churn_and_attrition_with_shared_percentage() {
        assert!(is_duplicate(
            "Reduced customer churn by 15% through proactive outreach",
            "Decreased customer attrition by 15% via a proactive outreach program",
        ));
    }

    #[test]
    fn test_conflicting_metrics_suppress_similar_wording() {
        let b = breakdown("Reduced costs by 20%", "Reduced costs by 30%");
        assert_eq!(b.metric_signal, MetricSignal::Conflict);
        assert!(b.score < b.lexical);
        assert!(!b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_shared_metric_alone_is_not_enough() {
        let b = breakdown(
            "Grew newsletter subscribers by 30%",
            "Cut cloud hosting invoices by 30% after renegotiating contracts",
        );
        assert_eq!(b.metric_signal, MetricSignal::Agreement);
        assert!(!b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_quantities_are_not_lexical_tokens() {
        let b = breakdown("Reduced costs by 20%", "Reduced operating costs");
        assert_eq!(b.metric_signal, MetricSignal::None);
        // reduce, cost vs reduce, operating, cost
        assert!((b.lexical - 0.8).abs() < 1e-12, "lexical was {}", b.lexical);
        assert_eq!(b.score, b.lexical);
    }

    #[test]
    fn test_opposite_directions_never_merge() {
        let b = breakdown("Reduced costs by 20%", "Increased costs by 20%");
        assert_eq!(b.metric_signal, MetricSignal::Agreement);
        assert!(b.opposing_direction);
        assert!((b.lexical - 0.5).abs() < 1e-12, "lexical was {}", b.lexical);
        assert!(!b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_same_direction_is_not_opposing() {
        let b = breakdown("Reduced costs by 20%", "Cut costs and increased margin by 20%");
        assert!(!b.opposing_direction);
    }

    #[test]
    fn test_shared_metric_with_different_subject_does_not_merge() {
        for (a, b) in [
            ("Grew revenue by 20%", "Grew headcount by 20%"),
            ("Cut churn by 15%", "Cut latency by 15%"),
            ("Led a team of 8 engineers", "Hired 8 engineers"),
        ] {
            let bd = breakdown(a, b);
            assert_eq!(bd.metric_signal, MetricSignal::Agreement, "{a:?} / {b:?}");
            assert!(bd.lexical < 0.6, "lexical {} for {a:?} / {b:?}", bd.lexical);
            assert_eq!(bd.score, bd.lexical, "{a:?} / {b:?}");
            assert!(!bd.is_duplicate(), "score {} for {a:?} / {b:?}", bd.score);
        }
    }

    #[test]
    fn test_years_are_not_metric_evidence() {
        let b = breakdown(
            "Promoted to senior engineer in 2019",
            "Promoted to senior engineer in 2021",
        );
        assert_eq!(b.metric_signal, MetricSignal::None);
        assert!(!b.is_duplicate(), "score was {}", b.score);
    }

    #[test]
    fn test_metric_on_one_side_only_uses_lexical_score() {
        let b = breakdown("Reduced costs by 20%", "Reduced costs");
        assert_eq!(b.metric_signal, MetricSignal::None);
        assert_eq!(b.score, b.lexical);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let (a, b) = crafted_pair(20, 17);
        let score = similarity(&a, &b);
        assert_eq!(score, 0.85);
        assert!(is_duplicate(&a, &b));
    }

    #[test]
    fn test_threshold_just_above_merges() {
        let (a, b) = crafted_pair(27, 23);
        let score = similarity(&a, &b);
        assert!(score > DUPLICATE_THRESHOLD && score < 0.86, "score was {score}");
        assert!(is_duplicate(&a, &b));
    }

    #[test]
    fn test_threshold_just_below_does_not_merge() {
        let (a, b) = crafted_pair(33, 28);
        let score = similarity(&a, &b);
        assert!(score < DUPLICATE_THRESHOLD && score > 0.84, "score was {score}");
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_punctuation_and_case_only_differences_are_identical() {
        assert_eq!(
            similarity("Shipped the iOS app.", "shipped the IOS app"),
            1.0
        );
    }
}
