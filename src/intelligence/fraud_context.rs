/// URL fragments that mark a source as fraud-adjacent.
const SUSPICIOUS_URL_TERMS: &[&str] = &[
    "pastebin", "darkweb", "hack", "crack", "carding", "cvv", "dumps", "fraud", "stolen",
    "breach", "leak",
];

/// Page content terms that mark a source as fraud-adjacent.
const SUSPICIOUS_CONTENT_TERMS: &[&str] = &[
    "cvv",
    "fullz",
    "dumps",
    "cashout",
    "carding",
    "fraud",
    "stolen credit card",
    "hacked",
    "leaked",
    "unauthorized",
    "darknet",
    "darkweb",
    "carder",
    "skimmer",
];

/// Card vocabulary counted for the density check.
const CARD_TERMS: &[&str] = &[
    "card", "credit", "debit", "visa", "mastercard", "amex", "bin", "cvv", "exp",
];

/// Combined card-term count above which a page is treated as fraud context.
pub const CARD_TERM_DENSITY_THRESHOLD: usize = 15;

/// Heuristic signal that a scraped page is related to carding activity.
///
/// Stages, first match wins:
/// 1. URL contains a suspicious term.
/// 2. Content contains a suspicious term.
/// 3. Combined card-term count exceeds [`CARD_TERM_DENSITY_THRESHOLD`].
///
/// All comparisons are on lowercased input. Not adversarially robust.
pub fn is_fraud_context(url: &str, content: &str) -> bool {
    let url_lower = url.to_lowercase();
    if SUSPICIOUS_URL_TERMS.iter().any(|t| url_lower.contains(t)) {
        return true;
    }

    let content_lower = content.to_lowercase();
    if SUSPICIOUS_CONTENT_TERMS
        .iter()
        .any(|t| content_lower.contains(t))
    {
        return true;
    }

    card_term_count(&content_lower) > CARD_TERM_DENSITY_THRESHOLD
}

/// Sum of non-overlapping occurrences of each card term.
/// "mastercard" counts toward both `mastercard` and `card`.
fn card_term_count(content_lower: &str) -> usize {
    CARD_TERMS
        .iter()
        .map(|t| content_lower.matches(t).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_denylist_alone_triggers() {
        assert!(is_fraud_context("https://pastebin.com/x", "hello"));
        assert!(is_fraud_context("https://EXAMPLE.com/Leaks/today", ""));
    }

    #[test]
    fn test_content_denylist_triggers() {
        assert!(is_fraud_context(
            "https://example.com",
            "this page mentions cvv and fullz data"
        ));
        assert!(is_fraud_context("https://example.com", "Fresh SKIMMER logs"));
    }

    #[test]
    fn test_density_over_threshold_triggers() {
        let content = "card card card card credit credit credit debit debit \
                       visa visa visa mastercard amex bin bin";
        assert_eq!(card_term_count(content), 17);
        assert!(is_fraud_context("https://example.com", content));
    }

    #[test]
    fn test_density_at_threshold_is_clean() {
        let content = "visa ".repeat(CARD_TERM_DENSITY_THRESHOLD);
        assert!(!is_fraud_context("https://example.com", &content));

        let content = "visa ".repeat(CARD_TERM_DENSITY_THRESHOLD + 1);
        assert!(is_fraud_context("https://example.com", &content));
    }

    #[test]
    fn test_clean_page() {
        let content = "card credit debit visa mastercard amex bin exp";
        assert_eq!(card_term_count(content), 9);
        assert!(!is_fraud_context("https://example.com/pricing", content));
        assert!(!is_fraud_context("https://example.com", "hello world"));
    }

    #[test]
    fn test_density_is_case_insensitive() {
        let content = "VISA ".repeat(16);
        assert!(is_fraud_context("https://example.com", &content));
    }
}
