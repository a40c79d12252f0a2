//! GitHub access for pull request review state.
//!
//! This module wraps Octocrab to parse pull request URLs, validate personal
//! access tokens, and read the pull request, commit, review, and review
//! request data the status engine consumes. Errors are mapped into
//! [`IntakeError`] variants so that callers never see Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::IntakeError;
pub use gateway::{MAX_PER_PAGE, OctocrabGateway, PullRequestGateway};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
    RepositorySlug,
};
pub use models::{Account, AccountKind, PullRequestSnapshot, Review, ReviewPage};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
