//! Project identifier input handling.
//!
//! User input is normalized (trimmed, lowercased) first and the normalized value is then
//! checked against the disallowed character set. The same normalized value is what gets
//! validated remotely.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@_!#$%^&*().<>?/\\|}{~:]").expect("special character class compiles"));

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a project ID.")]
    Empty,
    #[error("Do not use special characters.")]
    SpecialCharacters,
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when `input` contains none of `@_!#$%^&*().<>?/\|}{~:`.
pub fn is_sanitized(input: &str) -> bool {
    !SPECIAL_CHARS.is_match(input)
}

/// A normalized project identifier free of disallowed characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(InputError::Empty);
        }
        if !is_sanitized(&normalized) {
            return Err(InputError::SpecialCharacters);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource name used by the Google APIs, e.g. `projects/demo`.
    pub fn resource_name(&self) -> String {
        format!("projects/{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISALLOWED: &str = r"@_!#$%^&*().<>?/\|}{~:";

    #[test]
    fn every_disallowed_character_is_rejected() {
        for c in DISALLOWED.chars() {
            let candidate = format!("proj{c}ect");
            assert!(!is_sanitized(&candidate), "{candidate:?} should be rejected");
        }
    }

    #[test]
    fn underscore_rejected_hyphen_accepted() {
        assert!(!is_sanitized("my-project_1"));
        assert!(is_sanitized("my-project-1"));
    }

    #[test]
    fn other_punctuation_is_allowed() {
        for s in ["a-b", "a+b", "a=b", "a,b", "a;b", "a'b", "a\"b", "a[b]", "a`b", "ünïcode"] {
            assert!(is_sanitized(s), "{s:?} should be accepted");
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Demo-1 \n"), "demo-1");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["demo-1", "  MiXeD-Case  ", "", "\tx\t"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn parse_normalizes_before_checking() {
        let id = ProjectId::parse("  Demo-1 ").unwrap();
        assert_eq!(id.as_str(), "demo-1");
        assert_eq!(id.resource_name(), "projects/demo-1");
        assert_eq!(id.to_string(), "demo-1");
    }

    #[test]
    fn parse_rejects_blank_and_special() {
        assert_eq!(ProjectId::parse("   "), Err(InputError::Empty));
        assert_eq!(ProjectId::parse("my_project"), Err(InputError::SpecialCharacters));
        assert_eq!(ProjectId::parse("projects/x"), Err(InputError::SpecialCharacters));
    }

    #[test]
    fn input_error_messages_are_user_facing() {
        assert_eq!(InputError::SpecialCharacters.to_string(), "Do not use special characters.");
    }
}
