//! Discrete pull request status and its resolution from review state.
//!
//! [`PullRequestStatus`] is totally ordered by progress: the minimum of two
//! statuses is the more severe (less progressed) one, which is what
//! reconciliation across repositories relies on.

mod resolver;
mod threshold;

use std::fmt;

use serde::Serialize;

pub use resolver::{ResolverSettings, resolve};
pub use threshold::ApprovalThreshold;

/// Review/merge status of a pull request, least progressed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// The pull request is still a draft.
    Draft,
    /// Changes were requested, or approval was not reached while changes
    /// are outstanding.
    ChangesRequested,
    /// The pull request is awaiting enough approvals.
    InReview,
    /// The approval threshold is met.
    Approved,
    /// The pull request has been merged.
    Merged,
}

impl PullRequestStatus {
    /// Severity priority: lower values are less progressed.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Draft => 1,
            Self::ChangesRequested => 2,
            Self::InReview => 3,
            Self::Approved => 4,
            Self::Merged => 5,
        }
    }

    /// Wire name used in notifications.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::ChangesRequested => "CHANGES_REQUESTED",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Merged => "MERGED",
        }
    }

    /// Returns the more severe of two statuses.
    #[must_use]
    pub fn most_severe(self, other: Self) -> Self {
        self.min(other)
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
