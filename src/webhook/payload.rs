//! JSON body sent to webhook destinations.

use serde::Serialize;

use crate::github::PullRequestSnapshot;
use crate::issue::IssueIdSet;
use crate::status::PullRequestStatus;

/// Notification for one status group at one destination.
///
/// Serialises as
/// `{"issues": [...], "pullRequest": {"status", "title", "labels"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    /// Identifiers routed to this destination, in first-seen order.
    pub issues: IssueIdSet,
    /// Status and metadata of the base pull request.
    #[serde(rename = "pullRequest")]
    pub pull_request: PullRequestSummary,
}

/// Pull request context included in every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSummary {
    /// Reconciled status shared by every identifier in the payload.
    pub status: PullRequestStatus,
    /// Title of the base pull request.
    pub title: String,
    /// Label names of the base pull request.
    pub labels: Vec<String>,
}

impl WebhookPayload {
    /// Builds a payload for `issues` at `status`, taking the title and labels
    /// from the base pull request.
    #[must_use]
    pub fn new(issues: IssueIdSet, status: PullRequestStatus, base: &PullRequestSnapshot) -> Self {
        Self {
            issues,
            pull_request: PullRequestSummary {
                status,
                title: base.title.clone(),
                labels: base.labels.clone(),
            },
        }
    }
}
