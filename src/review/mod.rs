//! Per-reviewer review state for a single pull request.
//!
//! [`ReviewStateCollector`] reduces the review history and the outstanding
//! review requests of one pull request into [`ReviewerStates`]: at most one
//! state per reviewer identity, where the latest submitted review wins and a
//! pending request never overwrites a submitted review.

mod collector;

use std::collections::BTreeMap;
use std::fmt;

pub use collector::ReviewStateCollector;

/// Stable reviewer identity (the numeric GitHub account id).
///
/// Logins are display values and may be reused, so they never key the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewerId(u64);

impl ReviewerId {
    /// Wraps a numeric account id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The current state a reviewer holds on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerState {
    /// The reviewer approved the pull request.
    Approved,
    /// The reviewer requested changes.
    ChangesRequested,
    /// The reviewer was requested but has not reviewed yet.
    Pending,
    /// Any other review state, e.g. `COMMENTED` or `DISMISSED`.
    Other(String),
}

impl ReviewerState {
    /// Maps a raw GitHub review state string.
    #[must_use]
    pub fn from_api(state: &str) -> Self {
        match state {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "PENDING" => Self::Pending,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ReviewerState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => formatter.write_str("APPROVED"),
            Self::ChangesRequested => formatter.write_str("CHANGES_REQUESTED"),
            Self::Pending => formatter.write_str("PENDING"),
            Self::Other(state) => formatter.write_str(state),
        }
    }
}

/// Latest state per reviewer identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerStates {
    states: BTreeMap<ReviewerId, ReviewerState>,
}

impl ReviewerStates {
    /// Records a submitted review, superseding any earlier state.
    pub fn record_review(&mut self, reviewer: ReviewerId, state: ReviewerState) {
        self.states.insert(reviewer, state);
    }

    /// Records an outstanding review request unless the reviewer already
    /// holds a state.
    pub fn record_request(&mut self, reviewer: ReviewerId) {
        self.states.entry(reviewer).or_insert(ReviewerState::Pending);
    }

    /// State currently held by `reviewer`.
    #[must_use]
    pub fn get(&self, reviewer: ReviewerId) -> Option<&ReviewerState> {
        self.states.get(&reviewer)
    }

    /// Number of distinct reviewer identities, pending requests included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true when nobody reviewed or was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of reviewers whose latest state is `state`.
    #[must_use]
    pub fn count(&self, state: &ReviewerState) -> usize {
        self.states.values().filter(|held| *held == state).count()
    }
}

impl FromIterator<(ReviewerId, ReviewerState)> for ReviewerStates {
    fn from_iter<T: IntoIterator<Item = (ReviewerId, ReviewerState)>>(iter: T) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
