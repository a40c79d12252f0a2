//! Gateways for reading pull request state through Octocrab.
//!
//! The [`PullRequestGateway`] trait is the seam between the status engine
//! and GitHub: the engine only ever sees snapshots, reviews, and reviewer
//! accounts, while [`OctocrabGateway`] handles HTTP, pagination, and error
//! mapping.

mod client;
mod commits;
mod error_mapping;
mod pull_request;
mod reviews;


pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestNumber, RepositorySlug};
use crate::github::models::{Account, PullRequestSnapshot, ReviewPage};

/// Maximum page size accepted by the GitHub REST API.
pub const MAX_PER_PAGE: u8 = 100;

/// Gateway that can load pull request and review data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch a single pull request snapshot.
    async fn pull_request(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<PullRequestSnapshot, IntakeError>;

    /// Fetch every commit message on the pull request, paging `per_page`
    /// commits at a time until a short page is returned.
    async fn list_commit_messages(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
        per_page: u8,
    ) -> Result<Vec<String>, IntakeError>;

    /// Fetch the first page (up to [`MAX_PER_PAGE`]) of reviews.
    async fn list_reviews(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<ReviewPage, IntakeError>;

    /// Fetch the accounts whose review is requested but not yet submitted.
    async fn list_requested_reviewers(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<Vec<Account>, IntakeError>;

    /// List up to `limit` open pull requests, most recently updated first.
    async fn list_pull_requests(
        &self,
        repository: &RepositorySlug,
        limit: u32,
    ) -> Result<Vec<PullRequestSnapshot>, IntakeError>;
}
