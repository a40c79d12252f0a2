//! Data models for pull requests, reviews, and reviewer accounts.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::IntakeError;
use super::locator::{PullRequestNumber, RepositorySlug};

/// Kind of GitHub account behind a review or review request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// A human user account.
    User,
    /// An automation account (GitHub App or bot user).
    Bot,
    /// Any other account type reported by GitHub (e.g. `Organization`).
    Other(String),
}

impl AccountKind {
    fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("User") => Self::User,
            Some("Bot") => Self::Bot,
            Some(other) => Self::Other(other.to_owned()),
            None => Self::Other(String::new()),
        }
    }
}

/// A GitHub account, identified by its stable numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable numeric account id.
    pub id: u64,
    /// Login, for display only.
    pub login: String,
    /// Account type.
    pub kind: AccountKind,
}

/// A submitted (or pending) pull request review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Review author; `None` for deleted ("ghost") accounts.
    pub author: Option<Account>,
    /// Raw review state, e.g. `APPROVED` or `COMMENTED`.
    pub state: String,
    /// Submission time, absent for reviews that were never submitted.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// The first page of reviews for a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPage {
    /// Reviews in the order GitHub returned them.
    pub reviews: Vec<Review>,
    /// Set when the page was full, meaning later reviews may be missing.
    pub possibly_truncated: bool,
}

/// Minimal pull request state needed to resolve a review status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSnapshot {
    /// Repository hosting the pull request.
    pub repository: RepositorySlug,
    /// Pull request number.
    pub number: PullRequestNumber,
    /// Title of the pull request.
    pub title: String,
    /// Whether the pull request is a draft.
    pub draft: bool,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// Label names attached to the pull request.
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) login: String,
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) draft: Option<bool>,
    #[serde(default)]
    pub(crate) merged: Option<bool>,
    #[serde(default)]
    pub(crate) merged_at: Option<String>,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReview {
    pub(crate) user: Option<ApiUser>,
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitDetail {
    #[serde(default)]
    pub(crate) message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRequestedReviewers {
    #[serde(default)]
    pub(crate) users: Vec<ApiUser>,
}

impl From<ApiUser> for Account {
    fn from(value: ApiUser) -> Self {
        Self {
            id: value.id,
            login: value.login,
            kind: AccountKind::from_api(value.kind.as_deref()),
        }
    }
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            author: value.user.map(Account::from),
            state: value.state,
            submitted_at: value.submitted_at,
        }
    }
}

impl ApiPullRequest {
    /// Converts the API payload into a snapshot owned by `repository`.
    ///
    /// The listing endpoint omits `merged`, so a non-null `merged_at` is
    /// used as the fallback signal.
    pub(crate) fn into_snapshot(
        self,
        repository: &RepositorySlug,
    ) -> Result<PullRequestSnapshot, IntakeError> {
        let merged = self.merged.unwrap_or_else(|| self.merged_at.is_some());
        Ok(PullRequestSnapshot {
            repository: repository.clone(),
            number: PullRequestNumber::new(self.number)?,
            title: self.title.unwrap_or_default(),
            draft: self.draft.unwrap_or(false),
            merged,
            labels: self.labels.into_iter().map(|label| label.name).collect(),
        })
    }
}
