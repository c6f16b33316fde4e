//! Conventional Commit message classification.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The eleven standard Conventional Commit types.
pub const STANDARD_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

// Type, optional parenthesized scope, optional breaking-change marker, then
// ": description". Matched against the case-folded first line, so the type
// class only needs lowercase letters.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static MESSAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(?:\(([\w\-\. ]+)\))?(!)?: (.+)").unwrap());

/// Structured form of a commit message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// The type token before the colon, case-folded.
    pub commit_type: String,
    /// Optional parenthesized scope, trimmed of surrounding whitespace.
    pub scope: Option<String>,
    /// Whether the `!` breaking-change marker is present.
    pub breaking: bool,
    /// The free-text description after the colon.
    pub description: String,
}

/// Verdict for a single commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Message uses one of the standard Conventional Commit types.
    Standard(String),
    /// Message has Conventional Commit shape but a non-standard type.
    /// Whether it counts as conventional depends on the repository's
    /// custom-type consistency set.
    Custom(String),
    /// Message does not follow the convention at all.
    Unconventional,
}

impl Classification {
    /// Returns the type token if the message parsed at all.
    pub fn commit_type(&self) -> Option<&str> {
        match self {
            Self::Standard(t) | Self::Custom(t) => Some(t),
            Self::Unconventional => None,
        }
    }

    /// Whether the message uses a standard type.
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }
}

/// Parses a commit message header into its Conventional Commit parts.
///
/// The message is case-folded before matching, so type comparison is
/// case-insensitive. Returns `None` for anything that does not have the
/// `type(scope)!: description` shape.
pub fn parse_message(message: &str) -> Option<ParsedMessage> {
    let folded = message.to_lowercase();
    let captures = MESSAGE_PATTERN.captures(&folded)?;

    let commit_type = captures.get(1)?.as_str().to_string();
    let scope = captures.get(2).map(|m| m.as_str().trim().to_string());
    let breaking = captures.get(3).is_some();
    let description = captures.get(4)?.as_str().to_string();

    Some(ParsedMessage {
        commit_type,
        scope,
        breaking,
        description,
    })
}

/// Checks membership in the standard Conventional Commit type vocabulary.
pub fn is_standard_type(commit_type: &str) -> bool {
    STANDARD_TYPES.contains(&commit_type)
}

/// Classifies a commit message as standard, custom-typed, or unconventional.
pub fn classify(message: &str) -> Classification {
    match parse_message(message) {
        Some(parsed) if is_standard_type(&parsed.commit_type) => {
            Classification::Standard(parsed.commit_type)
        }
        Some(parsed) => Classification::Custom(parsed.commit_type),
        None => Classification::Unconventional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_type_is_recognized() {
        let result = classify("feat: add x");
        assert_eq!(result, Classification::Standard("feat".to_string()));
        assert!(result.is_standard());
    }

    #[test]
    fn custom_type_is_recognized() {
        let result = classify("sparkle: shiny thing");
        assert_eq!(result, Classification::Custom("sparkle".to_string()));
        assert!(!result.is_standard());
    }

    #[test]
    fn message_without_separator_is_unconventional() {
        assert_eq!(classify("no colon here"), Classification::Unconventional);
        assert_eq!(classify("feat add x"), Classification::Unconventional);
    }

    #[test]
    fn type_matching_is_case_insensitive() {
        assert_eq!(
            classify("Fix: typo"),
            Classification::Standard("fix".to_string())
        );
        assert_eq!(
            classify("FEAT: shouting"),
            Classification::Standard("feat".to_string())
        );
    }

    #[test]
    fn scope_and_breaking_marker_parse() {
        let parsed = parse_message("feat(parser)!: change tokenizer").expect("should parse");
        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.scope.as_deref(), Some("parser"));
        assert!(parsed.breaking);
        assert_eq!(parsed.description, "change tokenizer");
    }

    #[test]
    fn scope_allows_word_chars_hyphen_dot_space() {
        let parsed = parse_message("fix(api v2.1-rc): handle nulls").expect("should parse");
        assert_eq!(parsed.scope.as_deref(), Some("api v2.1-rc"));
    }

    #[test]
    fn colon_without_space_does_not_match() {
        assert_eq!(classify("feat:add x"), Classification::Unconventional);
    }

    #[test]
    fn empty_description_does_not_match() {
        assert_eq!(classify("feat: "), Classification::Unconventional);
        assert_eq!(classify(""), Classification::Unconventional);
    }

    #[test]
    fn description_stops_at_first_line() {
        let parsed = parse_message("fix: first line\n\nbody text").expect("should parse");
        assert_eq!(parsed.description, "first line");
    }

    #[test]
    fn revert_is_part_of_the_vocabulary() {
        assert!(is_standard_type("revert"));
        assert!(!is_standard_type("merge"));
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn classify_never_panics(s in ".*") {
                let _ = classify(&s);
            }

            #[test]
            fn classify_is_deterministic(s in ".*") {
                prop_assert_eq!(classify(&s), classify(&s));
            }

            #[test]
            fn standard_and_custom_are_exclusive(s in ".*") {
                if let Some(t) = classify(&s).commit_type() {
                    prop_assert_eq!(classify(&s).is_standard(), is_standard_type(t));
                }
            }
        }
    }
}
