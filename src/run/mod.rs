//! One end-to-end status run for a base pull request.
//!
//! A run fetches the base pull request, extracts issue identifiers from its
//! commits and title, resolves its status, reconciles that status across the
//! additional repositories, and dispatches the result to webhooks. Every
//! step is sequential.

use crate::config::RunSettings;
use crate::github::{
    IntakeError, PullRequestGateway, PullRequestNumber, PullRequestSnapshot, RepositorySlug,
};
use crate::issue::IssueIdSet;
use crate::reconcile::{CrossRepoReconciler, IssueStatusIndex, ResolvedPullRequest};
use crate::review::ReviewStateCollector;
use crate::status::resolve;
use crate::webhook::{DispatchReport, WebhookRouter, WebhookSender};

pub use crate::error::RunError;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The base pull request references no issue identifier.
    NothingToReport,
    /// Statuses were reconciled and webhooks were called.
    Dispatched {
        /// Final status per issue identifier.
        index: IssueStatusIndex,
        /// Webhook delivery counts.
        report: DispatchReport,
    },
}

/// Drives a status run through a gateway and a webhook sender.
pub struct StatusRun<'run, Gateway, Sender>
where
    Gateway: PullRequestGateway,
    Sender: WebhookSender,
{
    gateway: &'run Gateway,
    sender: &'run Sender,
    settings: &'run RunSettings,
}

impl<'run, Gateway, Sender> StatusRun<'run, Gateway, Sender>
where
    Gateway: PullRequestGateway,
    Sender: WebhookSender,
{
    /// Creates a run over validated `settings`.
    #[must_use]
    pub const fn new(
        gateway: &'run Gateway,
        sender: &'run Sender,
        settings: &'run RunSettings,
    ) -> Self {
        Self {
            gateway,
            sender,
            settings,
        }
    }

    /// Executes the run for the pull request `number` in `repository`.
    ///
    /// Finding no issue identifier is not an error: the run ends with
    /// [`RunOutcome::NothingToReport`] before any review data is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Upstream`] when any GitHub call fails. Webhook
    /// delivery failures are only counted in the [`DispatchReport`].
    pub async fn execute(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<RunOutcome, RunError> {
        let Some(base) = self.resolve_base(repository, number).await? else {
            return Ok(RunOutcome::NothingToReport);
        };

        let index = CrossRepoReconciler::new(
            self.gateway,
            &self.settings.title_pattern,
            self.settings.resolver,
        )
        .reconcile(
            &base,
            &self.settings.additional_repositories,
            self.settings.pull_request_limit,
        )
        .await?;

        let report = WebhookRouter::new(self.sender, &self.settings.routes)
            .dispatch(&index, &base.snapshot)
            .await;
        let (delivered, failed) = (report.delivered, report.failed);
        tracing::info!("dispatch finished: {delivered} delivered, {failed} failed");

        Ok(RunOutcome::Dispatched { index, report })
    }

    /// Fetches the base pull request, its issue identifiers and its status.
    ///
    /// Returns `None` when the pull request references no identifier.
    async fn resolve_base(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<Option<ResolvedPullRequest>, IntakeError> {
        let snapshot = self.gateway.pull_request(repository, number).await?;
        let issue_ids = self.collect_issue_ids(&snapshot).await?;
        if issue_ids.is_empty() {
            tracing::info!("{repository}{number} references no issue identifiers; nothing to report");
            return Ok(None);
        }
        let found = issue_ids.to_strings().join(", ");
        tracing::info!("{repository}{number} references {found}");

        let reviewers = ReviewStateCollector::new(self.gateway)
            .collect(repository, number)
            .await?;
        let Some(status) = resolve(&snapshot, &reviewers, &issue_ids, &self.settings.resolver)
        else {
            return Ok(None);
        };
        tracing::info!("{repository}{number} is {status}");

        Ok(Some(ResolvedPullRequest {
            snapshot,
            issue_ids,
            status,
        }))
    }

    async fn collect_issue_ids(
        &self,
        snapshot: &PullRequestSnapshot,
    ) -> Result<IssueIdSet, IntakeError> {
        let mut issue_ids = IssueIdSet::default();
        if !self.settings.ignore_commits {
            let messages = self
                .gateway
                .list_commit_messages(
                    &snapshot.repository,
                    snapshot.number,
                    self.settings.commits_per_page,
                )
                .await?;
            let from_commits = self
                .settings
                .commit_pattern
                .extract(messages.iter().map(String::as_str));
            issue_ids.extend(from_commits.iter().cloned());
        }
        if !self.settings.ignore_title {
            let from_title = self.settings.title_pattern.extract([snapshot.title.as_str()]);
            issue_ids.extend(from_title.iter().cloned());
        }
        Ok(issue_ids)
    }
}
