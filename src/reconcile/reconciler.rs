//! Fan-out over additional repositories with per-run memoisation.

use std::collections::HashMap;

use super::IssueStatusIndex;
use crate::github::{
    IntakeError, PullRequestGateway, PullRequestNumber, PullRequestSnapshot, RepositorySlug,
};
use crate::issue::{IssueIdSet, IssuePattern};
use crate::review::ReviewStateCollector;
use crate::status::{PullRequestStatus, ResolverSettings, resolve};

/// The base pull request after its own status was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPullRequest {
    /// Snapshot of the pull request.
    pub snapshot: PullRequestSnapshot,
    /// Issue identifiers the pull request references.
    pub issue_ids: IssueIdSet,
    /// Resolved status.
    pub status: PullRequestStatus,
}

type PullRequestKey = (RepositorySlug, PullRequestNumber);

fn key_of(snapshot: &PullRequestSnapshot) -> PullRequestKey {
    (snapshot.repository.clone(), snapshot.number)
}

/// Reconciles issue statuses across repositories.
///
/// Each reconciler owns its memoisation map, so a pull request is resolved
/// at most once per reconciler even when it mentions several tracked
/// identifiers or its repository is listed twice.
pub struct CrossRepoReconciler<'run, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'run Gateway,
    title_pattern: &'run IssuePattern,
    settings: ResolverSettings,
    resolved: HashMap<PullRequestKey, Option<PullRequestStatus>>,
}

impl<'run, Gateway> CrossRepoReconciler<'run, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Creates a reconciler that extracts identifiers from titles with
    /// `title_pattern` and resolves statuses with `settings`.
    #[must_use]
    pub fn new(
        client: &'run Gateway,
        title_pattern: &'run IssuePattern,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            client,
            title_pattern,
            settings,
            resolved: HashMap::new(),
        }
    }

    /// Builds the issue status index for `base` across `repositories`.
    ///
    /// Repositories are scanned in order, listing up to `limit` open pull
    /// requests each. Only pull request titles are scanned, and identifiers
    /// the base pull request does not reference are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure; repositories are not retried.
    pub async fn reconcile(
        &mut self,
        base: &ResolvedPullRequest,
        repositories: &[RepositorySlug],
        limit: u32,
    ) -> Result<IssueStatusIndex, IntakeError> {
        let mut index = IssueStatusIndex::seeded(&base.issue_ids, base.status);
        self.resolved
            .insert(key_of(&base.snapshot), Some(base.status));

        for repository in repositories {
            let pulls = self.client.list_pull_requests(repository, limit).await?;
            let count = pulls.len();
            tracing::info!("scanning {count} open pull requests in {repository}");

            for pull in pulls {
                let issue_ids = self.title_pattern.extract([pull.title.as_str()]);
                let tracked: Vec<_> = issue_ids
                    .iter()
                    .filter(|id| index.contains(id))
                    .cloned()
                    .collect();
                if tracked.is_empty() {
                    continue;
                }

                let Some(status) = self.status_of(&pull, &issue_ids).await? else {
                    continue;
                };
                let number = pull.number;
                for id in &tracked {
                    if index.merge(id, status) {
                        tracing::info!("{id} lowered to {status} by {repository}{number}");
                    }
                }
            }
        }

        Ok(index)
    }

    async fn status_of(
        &mut self,
        pull: &PullRequestSnapshot,
        issue_ids: &IssueIdSet,
    ) -> Result<Option<PullRequestStatus>, IntakeError> {
        let key = key_of(pull);
        if let Some(status) = self.resolved.get(&key) {
            return Ok(*status);
        }

        let reviewers = ReviewStateCollector::new(self.client)
            .collect(&pull.repository, pull.number)
            .await?;
        let status = resolve(pull, &reviewers, issue_ids, &self.settings);
        let (repository, number) = &key;
        tracing::debug!("{repository}{number} resolved to {status:?}");
        self.resolved.insert(key, status);
        Ok(status)
    }
}
