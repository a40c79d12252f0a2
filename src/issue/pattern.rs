//! Delimited issue patterns (`/PATTERN/FLAGS`) and identifier extraction.

use std::fmt;

use regex::{Regex, RegexBuilder};

use super::{IssueIdSet, IssueIdentifier};
use crate::error::RunError;

/// Pattern used when no commit or title pattern is configured.
pub const DEFAULT_ISSUE_PATTERN: &str = r"/[A-Za-z]{2,4}-\d+/g";

/// A validated, compiled issue pattern.
///
/// Patterns are written in the `/PATTERN/FLAGS` form. Supported flags are
/// `i` (case-insensitive), `m` (multi-line anchors), and `s` (dot matches
/// newline); `g`, `u`, and `d` are accepted and have no effect because every
/// match is always collected and matching is always Unicode-aware.
///
/// Unicode awareness reaches the character classes too: `\d` matches any
/// Unicode decimal digit, so the default pattern accepts `ABC-١٢`. Write
/// `[0-9]` or `(?-u:\d)` to restrict a pattern to ASCII digits.
///
/// # Example
///
/// ```
/// use herald::issue::IssuePattern;
///
/// let pattern = IssuePattern::parse(r"/[A-Za-z]{2,4}-\d+/g").expect("pattern should parse");
/// let ids = pattern.extract(["fix ABC-12 bug", "ABC-12: hotfix"]);
/// assert_eq!(ids.to_strings(), vec!["ABC-12"]);
/// ```
#[derive(Clone)]
pub struct IssuePattern {
    source: String,
    regex: Regex,
}

impl IssuePattern {
    /// Parses and compiles a delimited pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] when the value does not start with
    /// `/`, has no closing `/`, carries an unsupported or repeated flag, or
    /// does not compile.
    pub fn parse(delimited: &str) -> Result<Self, RunError> {
        let trimmed = delimited.trim();
        let body = trimmed.strip_prefix('/').ok_or_else(|| {
            RunError::configuration(format!(
                "issue pattern {trimmed:?} must be written as /PATTERN/FLAGS"
            ))
        })?;
        let (expression, flags) = body.rsplit_once('/').ok_or_else(|| {
            RunError::configuration(format!(
                "issue pattern {trimmed:?} is missing its closing delimiter"
            ))
        })?;
        if expression.is_empty() {
            return Err(RunError::configuration(format!(
                "issue pattern {trimmed:?} is empty"
            )));
        }

        let mut builder = RegexBuilder::new(expression);
        let mut used = String::new();
        for flag in flags.chars() {
            if used.contains(flag) {
                return Err(RunError::configuration(format!(
                    "issue pattern {trimmed:?} repeats flag '{flag}'"
                )));
            }
            used.push(flag);
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'd' => {}
                other => {
                    return Err(RunError::configuration(format!(
                        "issue pattern {trimmed:?} uses unsupported flag '{other}'"
                    )));
                }
            }
        }

        let regex = builder.build().map_err(|error| {
            RunError::configuration(format!("issue pattern {trimmed:?} does not compile: {error}"))
        })?;

        Ok(Self {
            source: trimmed.to_owned(),
            regex,
        })
    }

    /// Collects every non-overlapping match across `texts`, deduplicated in
    /// first-seen order.
    pub fn extract<'text, I>(&self, texts: I) -> IssueIdSet
    where
        I: IntoIterator<Item = &'text str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.regex.find_iter(text))
            .map(|found| IssueIdentifier::new(found.as_str()))
            .collect()
    }

    /// The delimited form the pattern was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for IssuePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_ISSUE_PATTERN.to_owned(),
            regex: default_regex(),
        }
    }
}

#[expect(
    clippy::expect_used,
    reason = "the default pattern is a compile-time constant covered by tests"
)]
fn default_regex() -> Regex {
    Regex::new(r"[A-Za-z]{2,4}-\d+").expect("default issue pattern is valid")
}

impl fmt::Debug for IssuePattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("IssuePattern")
            .field(&self.source)
            .finish()
    }
}

impl PartialEq for IssuePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for IssuePattern {}
