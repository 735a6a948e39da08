// Core PII pattern matching and redaction

use once_cell::sync::Lazy;
use regex::Regex;

/// Unicode-aware email pattern
pub(crate) const EMAIL_PATTERN: &str = r"(?u)\b[\p{L}\p{N}._%+-]+@[\p{L}\p{N}.-]+\.[\p{L}]{2,}\b";

/// Phone-shaped runs: an optional leading `+`, then at least nine digits
/// allowing common separators. The nine-digit floor keeps ISO dates
/// (eight digits) and clock times out of scope.
pub(crate) const PHONE_PATTERN: &str = r"\+?\d(?:[\s().\-/]?\d){8,}";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_REGEX should compile - this is a bug"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("PHONE_REGEX should compile - this is a bug"));

const EMAIL_REPLACEMENT: &str = "[redacted-email]";
const PHONE_REPLACEMENT: &str = "[redacted-phone]";

/// Replace email- and phone-shaped substrings with redaction markers.
///
/// Emails are redacted first so digits inside an address are not
/// re-matched as a phone number.
///
/// # Examples
///
/// ```
/// use eventsift_common::redact_pii;
///
/// let text = "Contact anna.keller@example.com or +41 44 123 45 67";
/// assert_eq!(redact_pii(text), "Contact [redacted-email] or [redacted-phone]");
/// ```
#[must_use]
pub fn redact_pii(text: &str) -> String {
    let without_emails = EMAIL_REGEX.replace_all(text, EMAIL_REPLACEMENT);
    PHONE_REGEX.replace_all(&without_emails, PHONE_REPLACEMENT).into_owned()
}

/// Whether the text contains any email- or phone-shaped substring
#[must_use]
pub fn contains_pii(text: &str) -> bool {
    EMAIL_REGEX.is_match(text) || PHONE_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_email_addresses() {
        let out = redact_pii("RSVP to events@firma.de by Friday");
        assert_eq!(out, "RSVP to [redacted-email] by Friday");
    }

    #[test]
    fn test_redacts_phone_numbers() {
        assert_eq!(redact_pii("Call +41 79 555 12 34"), "Call [redacted-phone]");
        assert_eq!(redact_pii("Hotline: 0800-123-45-67"), "Hotline: [redacted-phone]");
    }

    #[test]
    fn test_keeps_dates_and_times() {
        // Canonical timestamps must survive redaction untouched
        let text = "Scheduled 2026-03-12T08:00 until 2026-03-12T09:00";
        assert_eq!(redact_pii(text), text);
        assert!(!contains_pii(text));
    }

    #[test]
    fn test_unicode_email_redacted() {
        let out = redact_pii("schreib an müller@beispiel.de");
        assert_eq!(out, "schreib an [redacted-email]");
    }

    #[test]
    fn test_mixed_pii_both_redacted() {
        let out = redact_pii("anna@x.ch / +49 170 1234567");
        assert!(!out.contains('@'));
        assert!(out.contains("[redacted-email]"));
        assert!(out.contains("[redacted-phone]"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "Outbound flight ZRH-BER at gate A52";
        assert_eq!(redact_pii(text), text);
    }
}
