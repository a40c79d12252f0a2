//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::github::error::IntakeError;
use crate::github::locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositorySlug,
};
use crate::github::models::{Account, ApiPullRequest, PullRequestSnapshot, ReviewPage};

use super::client::{build_octocrab_client, get_page};
use super::commits::fetch_commit_messages;
use super::error_mapping::map_octocrab_error;
use super::reviews::{fetch_requested_reviewers, fetch_reviews};
use super::{MAX_PER_PAGE, PullRequestGateway};

const OPEN_BY_RECENT_UPDATE: [(&str, &str); 3] = [
    ("state", "open"),
    ("sort", "updated"),
    ("direction", "desc"),
];

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token, talking to the API
    /// host derived from the pull request locator.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
    /// `IntakeError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, IntakeError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<PullRequestSnapshot, IntakeError> {
        self.client
            .get::<ApiPullRequest, _, _>(repository.pull_request_path(number), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull request", &error))?
            .into_snapshot(repository)
    }

    async fn list_commit_messages(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
        per_page: u8,
    ) -> Result<Vec<String>, IntakeError> {
        fetch_commit_messages(&self.client, repository, number, per_page).await
    }

    async fn list_reviews(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<ReviewPage, IntakeError> {
        fetch_reviews(&self.client, repository, number).await
    }

    async fn list_requested_reviewers(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<Vec<Account>, IntakeError> {
        fetch_requested_reviewers(&self.client, repository, number).await
    }

    async fn list_pull_requests(
        &self,
        repository: &RepositorySlug,
        limit: u32,
    ) -> Result<Vec<PullRequestSnapshot>, IntakeError> {
        if limit == 0 {
            return Err(IntakeError::InvalidPagination {
                message: "pull request limit must be at least 1".to_owned(),
            });
        }

        let route = repository.pulls_path();
        let wanted = usize::try_from(limit).unwrap_or(usize::MAX);
        let per_page = u8::try_from(limit).map_or(MAX_PER_PAGE, |value| value.min(MAX_PER_PAGE));
        let mut snapshots = Vec::new();
        let mut page = 1_u32;

        loop {
            let pulls: Vec<ApiPullRequest> = get_page(
                &self.client,
                "list pulls",
                &route,
                page,
                per_page,
                &OPEN_BY_RECENT_UPDATE,
            )
            .await?;
            let fetched = pulls.len();

            for pull in pulls {
                if snapshots.len() >= wanted {
                    break;
                }
                snapshots.push(pull.into_snapshot(repository)?);
            }

            if fetched < usize::from(per_page) || snapshots.len() >= wanted {
                break;
            }
            page = page.saturating_add(1);
        }

        Ok(snapshots)
    }
}
