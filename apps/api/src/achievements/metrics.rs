//! Metric extraction: percentages, currency amounts and bare counts.
//!
//! Patterns run on the raw statement text. Percentages and currency claim
//! their spans first; a count is any remaining standalone integer. Whether a
//! count is meaningful evidence is left to the similarity scorer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::achievements::models::{MetricKind, MetricToken};

// "15%", "12.5%", "1,200%"
static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)%").unwrap()
});

// "$2.5M", "€40k", "USD 1,200", "GBP3B"
static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[$€£]|\b(?:USD|EUR|GBP)\s?)(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(?:(?P<mag>[KkMmBb])\b)?",
    )
    .unwrap()
});

// Standalone integers; "1,200" counts as one number, "2.5" is filtered out below.
static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,3}(?:,\d{3})+\b|\b\d+(?:\.\d+)?\b").unwrap());

/// Extracts every distinct metric token from `text`, in order of appearance.
///
/// A raw string matched twice is returned once. Text with no recognisable
/// metric yields an empty list.
pub fn extract_metrics(text: &str) -> Vec<MetricToken> {
    let mut found: Vec<(usize, MetricToken)> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for cap in PERCENT_PATTERN.captures_iter(text) {
        let (Some(whole), Some(num)) = (cap.get(0), cap.name("num")) else {
            continue;
        };
        if let Some(value) = parse_number(num.as_str()) {
            claimed.push((whole.start(), whole.end()));
            found.push((
                whole.start(),
                MetricToken {
                    raw: whole.as_str().to_string(),
                    kind: MetricKind::Percentage,
                    normalized_value: value / 100.0,
                },
            ));
        }
    }

    for cap in CURRENCY_PATTERN.captures_iter(text) {
        let (Some(whole), Some(num)) = (cap.get(0), cap.name("num")) else {
            continue;
        };
        if overlaps(&claimed, whole.start(), whole.end()) {
            continue;
        }
        let multiplier = cap
            .name("mag")
            .map(|m| magnitude(m.as_str()))
            .unwrap_or(1.0);
        if let Some(value) = parse_number(num.as_str()) {
            claimed.push((whole.start(), whole.end()));
            found.push((
                whole.start(),
                MetricToken {
                    raw: whole.as_str().to_string(),
                    kind: MetricKind::Currency,
                    normalized_value: value * multiplier,
                },
            ));
        }
    }

    for m in COUNT_PATTERN.find_iter(text) {
        if m.as_str().contains('.') || overlaps(&claimed, m.start(), m.end()) {
            continue;
        }
        if let Some(value) = parse_number(m.as_str()) {
            found.push((
                m.start(),
                MetricToken {
                    raw: m.as_str().to_string(),
                    kind: MetricKind::Count,
                    normalized_value: value,
                },
            ));
        }
    }

    found.sort_by_key(|(start, _)| *start);

    let mut tokens: Vec<MetricToken> = Vec::with_capacity(found.len());
    for (_, token) in found {
        if !tokens.iter().any(|t| t.raw == token.raw) {
            tokens.push(token);
        }
    }
    tokens
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn magnitude(suffix: &str) -> f64 {
    match suffix {
        "K" | "k" => 1e3,
        "M" | "m" => 1e6,
        "B" | "b" => 1e9,
        _ => 1.0,
    }
}

fn overlaps(claimed: &[(usize, usize)], start: usize, end: usize) -> bool {
    claimed.iter().any(|&(s, e)| start < e && s < end)
}
