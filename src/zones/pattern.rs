//! Postal-code pattern matching.
//!
//! # Responsibilities
//! - Compile a configured pattern string into its matching rules
//! - Decide whether one postal code matches one pattern
//!
//! # Design Decisions
//! - Patterns are compiled once, at deserialization time
//! - Every rule a pattern's syntax admits is evaluated; any success matches
//! - Malformed patterns never error, they simply never match (fail closed)
//! - No trimming or case folding: codes arrive exactly as the caller sent them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One way a pattern can match a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternRule {
    /// Byte-for-byte equality with the raw pattern.
    Exact(String),
    /// Inclusive numeric range, `start <= end` guaranteed.
    Range { start: i64, end: i64 },
    /// Code starts with the pattern minus every `*`.
    Prefix(String),
}

impl PatternRule {
    fn matches(&self, code: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == code,
            Self::Range { start, end } => code
                .parse::<i64>()
                .map(|n| *start <= n && n <= *end)
                .unwrap_or(false),
            Self::Prefix(prefix) => code.starts_with(prefix.as_str()),
        }
    }
}

/// A compiled entry of a zone's `pincode_patterns` list.
///
/// Deserializes from, and serializes back to, the raw pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PincodePattern {
    raw: String,
    rules: Vec<PatternRule>,
}

impl PincodePattern {
    /// Compile a pattern string.
    ///
    /// The exact rule is always kept, so a malformed range such as `abc-xyz`
    /// still matches the identical literal code, never any numeric one.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut rules = vec![PatternRule::Exact(raw.clone())];

        if let Some((start, end)) = parse_range(&raw) {
            if start <= end {
                rules.push(PatternRule::Range { start, end });
            }
        }

        if raw.contains('*') {
            rules.push(PatternRule::Prefix(raw.replace('*', "")));
        }

        Self { raw, rules }
    }

    /// Returns true if `code` satisfies any rule of this pattern.
    pub fn matches(&self, code: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(code))
    }

    /// The pattern exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// True when the pattern is written as a range but no code can ever
    /// satisfy that range (non-numeric or reversed bounds).
    pub fn is_dead_range(&self) -> bool {
        has_range_syntax(&self.raw)
            && !self
                .rules
                .iter()
                .any(|rule| matches!(rule, PatternRule::Range { .. }))
    }
}

impl From<String> for PincodePattern {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for PincodePattern {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<PincodePattern> for String {
    fn from(pattern: PincodePattern) -> Self {
        pattern.raw
    }
}

impl fmt::Display for PincodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Match a raw pattern string against a postal code.
///
/// Convenience for one-off checks; zones hold pre-compiled [`PincodePattern`]s.
pub fn matches(pattern: &str, code: &str) -> bool {
    PincodePattern::parse(pattern).matches(code)
}

fn has_range_syntax(raw: &str) -> bool {
    raw.matches('-').count() == 1
}

/// Split `"<start>-<end>"` into numeric bounds.
///
/// `None` when the pattern has other than exactly one `-` or either bound
/// is not an integer.
fn parse_range(raw: &str) -> Option<(i64, i64)> {
    if !has_range_syntax(raw) {
        return None;
    }
    let (start, end) = raw.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches("400001", "400001"));
        assert!(!matches("400001", "400002"));
        assert!(!matches("400001", " 400001"));
    }

    #[test]
    fn test_range_is_inclusive() {
        let pattern = PincodePattern::parse("400001-400100");
        assert!(pattern.matches("400050"));
        assert!(pattern.matches("400100"));
        assert!(pattern.matches("400001"));
        assert!(!pattern.matches("400101"));
        assert!(!pattern.matches("399999"));
    }

    #[test]
    fn test_range_rejects_non_numeric_code() {
        let pattern = PincodePattern::parse("400001-400100");
        assert!(!pattern.matches("4000AB"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn test_malformed_range_fails_closed() {
        let pattern = PincodePattern::parse("abc-xyz");
        for code in ["400001", "abc", "xyz", "0", "-1"] {
            assert!(!pattern.matches(code), "abc-xyz matched {code}");
        }
        assert!(pattern.is_dead_range());
    }

    #[test]
    fn test_reversed_range_never_matches() {
        let pattern = PincodePattern::parse("400100-400001");
        assert!(!pattern.matches("400050"));
        assert!(pattern.is_dead_range());
    }

    #[test]
    fn test_multiple_dashes_is_not_a_range() {
        let pattern = PincodePattern::parse("1-5-9");
        assert!(!pattern.matches("3"));
        assert!(!pattern.is_dead_range());
        assert_eq!(pattern.rules().len(), 1);
    }

    #[test]
    fn test_wildcard_prefix() {
        let pattern = PincodePattern::parse("4000*");
        assert!(pattern.matches("400099"));
        assert!(pattern.matches("400000"));
        assert!(!pattern.matches("410000"));
    }

    #[test]
    fn test_bare_star_matches_everything() {
        let pattern = PincodePattern::parse("*");
        assert!(pattern.matches("110001"));
        assert!(pattern.matches("anything"));
    }

    #[test]
    fn test_all_stars_are_stripped() {
        let pattern = PincodePattern::parse("*56*0*");
        assert!(pattern.matches("560034"));
        assert!(!pattern.matches("400560"));
    }

    #[test]
    fn test_wildcard_and_range_syntax_combined() {
        // Range bound "400*" is not numeric, so only the prefix "400-500" applies.
        let pattern = PincodePattern::parse("400*-500");
        assert!(!pattern.matches("450"));
        assert!(pattern.matches("400-5001"));
    }

    #[test]
    fn test_round_trips_raw_string() {
        let pattern: PincodePattern = serde_json::from_str("\"560100-560200\"").unwrap();
        assert_eq!(pattern.as_str(), "560100-560200");
        assert_eq!(
            pattern.rules()[1],
            PatternRule::Range {
                start: 560100,
                end: 560200
            }
        );
        assert_eq!(serde_json::to_string(&pattern).unwrap(), "\"560100-560200\"");
    }
}
