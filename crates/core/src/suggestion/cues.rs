//! Locale cue matching for structure detection
//!
//! Cue lists are data-driven: the matcher is built from a [`CueLexicon`]
//! rather than inline patterns, so locale additions and cue corrections are
//! plain data edits. The default lexicon carries English and German travel
//! vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word lists the matcher is built from.
///
/// Entries are matched case-insensitively as substrings of the candidate
/// title or source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueLexicon {
    /// General travel vocabulary
    pub travel: Vec<String>,
    /// Outward-leg markers
    pub outbound: Vec<String>,
    /// Return-leg markers
    pub return_leg: Vec<String>,
}

impl CueLexicon {
    /// Built-in English + German travel cues.
    pub fn default_lexicon() -> Self {
        Self {
            travel: to_strings(&[
                "flight", "train", "trip", "departure", "arrival", "outbound", "return",
                "check-in", "check-out", "airport", "reise", "flug", "zug", "abflug", "ankunft",
            ]),
            outbound: to_strings(&["outbound", "departure", "abflug", "hinflug", "hinfahrt"]),
            return_leg: to_strings(&["return", "arrival back"]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Short all-caps alphabetic codes (station/airport style, e.g. ZRH, BER)
static LOCATION_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z]{3,4}\b").expect("LOCATION_CODE_REGEX should compile - this is a bug")
});

/// Case-insensitive cue matching over a [`CueLexicon`].
#[derive(Debug, Clone)]
pub struct CueMatcher {
    lexicon: CueLexicon,
}

impl CueMatcher {
    /// Matcher over the default lexicon
    pub fn new() -> Self {
        Self { lexicon: CueLexicon::default_lexicon() }
    }

    /// Matcher over a caller-supplied lexicon
    pub fn with_lexicon(lexicon: CueLexicon) -> Self {
        Self { lexicon }
    }

    /// Whether the text carries any travel vocabulary
    #[must_use]
    pub fn has_travel_cue(&self, text: &str) -> bool {
        Self::matches_any(text, &self.lexicon.travel)
    }

    /// Whether the text marks an outward leg
    #[must_use]
    pub fn has_outbound_cue(&self, text: &str) -> bool {
        Self::matches_any(text, &self.lexicon.outbound)
    }

    /// Whether the text marks a return leg
    #[must_use]
    pub fn has_return_cue(&self, text: &str) -> bool {
        Self::matches_any(text, &self.lexicon.return_leg)
    }

    /// First short all-caps code in the text (e.g. "ZRH" from
    /// "Outbound flight ZRH-BER"), used as a location bucket key when no
    /// explicit location was extracted.
    #[must_use]
    pub fn location_code(&self, text: &str) -> Option<String> {
        LOCATION_CODE_REGEX.find(text).map(|m| m.as_str().to_string())
    }

    fn matches_any(text: &str, cues: &[String]) -> bool {
        let lowered = text.to_lowercase();
        cues.iter().any(|cue| lowered.contains(cue.as_str()))
    }
}

impl Default for CueMatcher {
    fn default() -> Self {
        Self::new()
    }
}
