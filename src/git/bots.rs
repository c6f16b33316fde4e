//! Bot-author detection.
//!
//! CI and dependency bots commit in bulk with templated messages and would
//! skew both the type distributions and the adoption signal, so the pipeline
//! drops their commits before enrichment. This is a name heuristic, not part
//! of the detector's contract.

/// Author-name fragments that identify well-known automation accounts.
const BOT_NAME_FRAGMENTS: [&str; 8] = [
    "dependabot",
    "renovate",
    "greenkeeper",
    "snyk-bot",
    "github-actions",
    "semantic-release-bot",
    "imgbot",
    "allcontributors",
];

/// Heuristically decides whether an author name belongs to a bot.
pub fn is_bot_author(author: &str) -> bool {
    let folded = author.to_lowercase();

    if folded.ends_with("[bot]") || folded.ends_with(" bot") || folded == "bot" {
        return true;
    }

    BOT_NAME_FRAGMENTS
        .iter()
        .any(|fragment| folded.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_bot_suffix_is_detected() {
        assert!(is_bot_author("dependabot[bot]"));
        assert!(is_bot_author("some-ci[bot]"));
    }

    #[test]
    fn known_bot_names_are_detected() {
        assert!(is_bot_author("Renovate Bot"));
        assert!(is_bot_author("github-actions"));
        assert!(is_bot_author("snyk-bot"));
    }

    #[test]
    fn humans_are_not_flagged() {
        assert!(!is_bot_author("Alice Smith"));
        assert!(!is_bot_author("Bob"));
        // "bot" inside a word is not a bot.
        assert!(!is_bot_author("Abbot Costello"));
    }
}
