//! Pure string utility functions for title normalization and comparison

use crate::constants::TITLE_TRUNCATE_SUFFIX;

/// Normalize a title for keying and comparison.
///
/// Lower-cases, maps punctuation to spaces, and collapses whitespace so
/// that `"Budget Review"` and `"budget   review!"` key identically.
/// Punctuation becomes a token boundary, never silent deletion - that
/// keeps `"ZRH-BER"` as two location tokens.
///
/// # Examples
///
/// ```
/// use eventsift_domain::utils::title::normalize_title;
///
/// assert_eq!(normalize_title("Budget  Review!"), "budget review");
/// assert_eq!(normalize_title("  Tr*ip: ZRH  "), "tr ip zrh");
/// ```
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize a title after normalization.
///
/// # Examples
///
/// ```
/// use eventsift_domain::utils::title::title_tokens;
///
/// assert_eq!(title_tokens("Workshop: Produkt"), vec!["workshop", "produkt"]);
/// ```
#[must_use]
pub fn title_tokens(title: &str) -> Vec<String> {
    normalize_title(title).split_whitespace().map(str::to_string).collect()
}

/// Fraction of `reference` tokens also present in `tokens`, in [0,1].
///
/// Returns 0.0 when the reference is empty.
#[must_use]
pub fn token_overlap(tokens: &[String], reference: &[String]) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let shared = reference.iter().filter(|t| tokens.contains(t)).count();
    shared as f64 / reference.len() as f64
}

/// Truncate a string to at most `max` characters, appending `...` when the
/// input was longer. The result never exceeds `max` characters.
#[must_use]
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let suffix_len = TITLE_TRUNCATE_SUFFIX.chars().count();
    let keep = max.saturating_sub(suffix_len);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TITLE_TRUNCATE_SUFFIX);
    out
}
