//! Text normalization: the comparison form of an achievement statement.
//!
//! `normalize` keeps every character the metric extractor cares about (digits,
//! `%`, currency symbols, separators inside numbers). `tokens` goes one step
//! further for lexical scoring: quantities are dropped (the metric signal
//! scores them), stop words are thinned and common résumé synonyms fold onto
//! one canonical word.

/// Canonical direction verbs. A statement that reduces something and one that
/// increases it never describe the same fact.
pub const REDUCE: &str = "reduce";
pub const INCREASE: &str = "increase";

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "of", "by", "in", "on", "for", "to", "and", "with", "via", "through", "at",
    "from", "as", "into", "across", "over", "our", "their", "its", "his", "her", "my", "this",
    "that", "these", "those", "was", "were", "is", "are", "be", "been", "which", "while",
    "within", "per",
];

/// Achievement verbs and résumé nouns that describe the same thing.
/// First element is the canonical form.
const SYNONYM_GROUPS: &[(&str, &[&str])] = &[
    (
        REDUCE,
        &[
            "reduced", "reduces", "reducing", "decrease", "decreased", "decreases",
            "decreasing", "cut", "cuts", "cutting", "lower", "lowered", "lowering", "slashed",
            "minimized", "minimised", "trimmed", "shrank",
        ],
    ),
    (
        INCREASE,
        &[
            "increased", "increases", "increasing", "boost", "boosted", "boosting", "grew",
            "grow", "grown", "growing", "raised", "expanded", "improved",
        ],
    ),
    (
        "lead",
        &[
            "led", "leads", "leading", "manage", "managed", "manages", "managing", "supervised",
            "directed", "headed", "oversaw",
        ],
    ),
    (
        "build",
        &["built", "builds", "building", "developed", "created", "engineered"],
    ),
    ("launch", &["launched", "shipped", "released", "delivered"]),
    ("save", &["saved", "saving", "savings"]),
    (
        "engineer",
        &["developer", "programmer", "coder"],
    ),
    ("cost", &["expense", "spend", "spending", "spent"]),
    ("revenue", &["sale", "income"]),
    ("churn", &["attrition"]),
    ("customer", &["client"]),
];

/// Lower-cases, strips punctuation, and collapses whitespace.
///
/// `.` and `,` survive only between two digits (`2.5`, `50,000`); `%`, `$`,
/// `€` and `£` always survive. Never fails: `"?!"` normalizes to `""`.
pub fn normalize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let keep = if c.is_alphanumeric() || matches!(c, '%' | '$' | '€' | '£') {
            true
        } else if c == '.' || c == ',' {
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            prev_digit && next_digit
        } else {
            false
        };

        if keep {
            out.extend(c.to_lowercase());
        } else {
            out.push(' ');
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison tokens: normalized words minus quantities, with stop words
/// thinned and synonyms folded.
///
/// Falls back to the unthinned words when the text is nothing but stop words.
pub fn tokens(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| !is_quantity(w))
        .collect();

    let thinned: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !STOP_WORDS.contains(w))
        .collect();
    let kept = if thinned.is_empty() { words } else { thinned };

    kept.into_iter().map(canonical_word).collect()
}

/// `20%`, `$1m`, `€40k`, `1,200`, `8`. Year-like numbers stay lexical: they
/// are not metric evidence, so "in 2019" vs "in 2021" still differ somewhere.
fn is_quantity(word: &str) -> bool {
    let body = word
        .trim_start_matches(['$', '€', '£'])
        .trim_end_matches(['%', 'k', 'm', 'b']);
    let numeric = body.chars().next().is_some_and(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',');
    if !numeric {
        return false;
    }
    let year_like = word.len() == 4
        && word == body
        && word.parse::<u32>().is_ok_and(|y| (1900..=2099).contains(&y));
    !year_like
}

fn canonical_word(word: &str) -> String {
    if let Some(canonical) = synonym_of(word) {
        return canonical.to_string();
    }
    let folded = fold_plural(word);
    match synonym_of(&folded) {
        Some(canonical) => canonical.to_string(),
        None => folded,
    }
}

fn synonym_of(word: &str) -> Option<&'static str> {
    SYNONYM_GROUPS
        .iter()
        .find(|(canonical, variants)| *canonical == word || variants.contains(&word))
        .map(|(canonical, _)| *canonical)
}

/// Strips a simple English plural from purely alphabetic words.
fn fold_plural(word: &str) -> String {
    if word.chars().count() <= 3 || !word.chars().all(char::is_alphabetic) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses_whitespace() {
        assert_eq!(
            normalize("  Reduced   Costs\tBy 20%  "),
            "reduced costs by 20%"
        );
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(
            normalize("Shipped v2 (on time!); cut bugs — fast."),
            "shipped v2 on time cut bugs fast"
        );
    }

    #[test]
    fn test_normalize_keeps_metric_characters() {
        assert_eq!(
            normalize("Saved $2.5M, grew ARR 12.5% and hired 1,200 people."),
            "saved $2.5m grew arr 12.5% and hired 1,200 people"
        );
    }

    #[test]
    fn test_normalize_keeps_non_dollar_currency_symbols() {
        assert_eq!(normalize("Won €40k / £3M deals"), "won €40k £3m deals");
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_tokens_thin_stop_words() {
        assert_eq!(tokens("Led a team of engineers"), vec!["lead", "team", "engineer"]);
    }

    #[test]
    fn test_tokens_fold_synonyms() {
        assert_eq!(tokens("Decreased costs by 20%"), vec!["reduce", "cost"]);
        assert_eq!(tokens("Reduced expenses by 20%"), vec!["reduce", "cost"]);
        assert_eq!(tokens("Boosted sales"), vec!["increase", "revenue"]);
    }

    #[test]
    fn test_tokens_fold_plurals() {
        assert_eq!(tokens("engineers developers"), vec!["engineer", "engineer"]);
        assert_eq!(tokens("companies"), vec!["company"]);
        assert_eq!(tokens("business status"), vec!["business", "status"]);
    }

    #[test]
    fn test_tokens_fall_back_when_only_stop_words() {
        assert_eq!(tokens("of the"), vec!["of", "the"]);
    }

    #[test]
    fn test_tokens_drop_quantities() {
        assert_eq!(tokens("$1M in sales"), vec!["revenue"]);
        assert_eq!(
            tokens("Led 8 engineers, grew ARR 12.5% to €40k across 1,200 stores"),
            vec!["lead", "engineer", "increase", "arr", "store"]
        );
    }

    #[test]
    fn test_tokens_keep_years_and_alphanumeric_words() {
        assert_eq!(tokens("Shipped v2 in 2019"), vec!["launch", "v2", "2019"]);
        assert_eq!(tokens("10x faster builds"), vec!["10x", "faster", "build"]);
    }
}
