/// Words that mark a message as plausibly a balance report.
pub const KEYWORDS: [&str; 5] = ["remaining", "package", "pack", "balance", "ethio"];

/// Cheap gate run before any extraction pattern.
///
/// Substring match on the lower-cased text. Acceptance does not promise that
/// extraction will find anything.
#[must_use]
pub fn classify(text: &str) -> bool {
    let lower = text.to_lowercase();
    KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_keyword_case_insensitively() {
        assert!(classify("Your REMAINING voice is 10 minute"));
        assert!(classify("ethio telecom"));
        assert!(classify("Student Pack activated"));
        assert!(classify("Balance: 3 Birr"));
    }

    #[test]
    fn keyword_inside_a_longer_word_counts() {
        assert!(classify("packaged goods"));
    }

    #[test]
    fn rejects_unrelated_chat() {
        assert!(!classify("hello, how are you?"));
        assert!(!classify(""));
    }
}
