//! Issue identifiers and their extraction from free text.
//!
//! Identifiers are plain tokens such as `ABC-12`, compared by exact,
//! case-sensitive string equality. Collections of identifiers keep the order
//! in which each identifier was first seen so that notifications and logs
//! are reproducible.

mod pattern;

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

pub use pattern::{DEFAULT_ISSUE_PATTERN, IssuePattern};

/// A tracked issue identifier, e.g. `ABC-12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueIdentifier(String);

impl IssueIdentifier {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IssueIdentifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for IssueIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Insertion-ordered set of issue identifiers.
///
/// # Example
///
/// ```
/// use herald::issue::{IssueIdSet, IssueIdentifier};
///
/// let mut ids = IssueIdSet::default();
/// assert!(ids.insert(IssueIdentifier::new("ABC-1")));
/// assert!(!ids.insert(IssueIdentifier::new("ABC-1")));
/// assert_eq!(ids.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct IssueIdSet {
    ordered: Vec<IssueIdentifier>,
    #[serde(skip)]
    seen: HashSet<IssueIdentifier>,
}

impl IssueIdSet {
    /// Adds an identifier, returning `false` when it was already present.
    pub fn insert(&mut self, id: IssueIdentifier) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.ordered.push(id);
        true
    }

    /// Returns true when the identifier is present.
    #[must_use]
    pub fn contains(&self, id: &IssueIdentifier) -> bool {
        self.seen.contains(id)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true when no identifier has been collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterates identifiers in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, IssueIdentifier> {
        self.ordered.iter()
    }

    /// Identifier texts in first-seen order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.ordered.iter().map(ToString::to_string).collect()
    }
}

impl PartialEq for IssueIdSet {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

impl Eq for IssueIdSet {}

impl Extend<IssueIdentifier> for IssueIdSet {
    fn extend<T: IntoIterator<Item = IssueIdentifier>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<IssueIdentifier> for IssueIdSet {
    fn from_iter<T: IntoIterator<Item = IssueIdentifier>>(iter: T) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'set> IntoIterator for &'set IssueIdSet {
    type Item = &'set IssueIdentifier;
    type IntoIter = std::slice::Iter<'set, IssueIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
