//! Dispatch of reconciled statuses to webhook destinations.

use url::Url;

use crate::github::PullRequestSnapshot;
use crate::issue::IssueIdSet;
use crate::reconcile::IssueStatusIndex;
use crate::status::PullRequestStatus;

use super::{WebhookPayload, WebhookRoutes, WebhookSender};

/// Outcome counts of a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Calls that received a success response.
    pub delivered: usize,
    /// Calls that failed in transport or were rejected.
    pub failed: usize,
}

impl DispatchReport {
    /// Total number of calls attempted.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Sends one notification per (status, destination) pair.
pub struct WebhookRouter<'run, Sender>
where
    Sender: WebhookSender,
{
    sender: &'run Sender,
    routes: &'run WebhookRoutes,
}

impl<'run, Sender> WebhookRouter<'run, Sender>
where
    Sender: WebhookSender,
{
    /// Creates a router over `routes` delivering through `sender`.
    #[must_use]
    pub const fn new(sender: &'run Sender, routes: &'run WebhookRoutes) -> Self {
        Self { sender, routes }
    }

    /// Dispatches every status group in `index`.
    ///
    /// Groups are visited from the most severe status upwards and
    /// destinations in route order. Each destination is called at most once
    /// per status group. Delivery failures are logged and counted; they
    /// never stop the remaining calls.
    pub async fn dispatch(
        &self,
        index: &IssueStatusIndex,
        base: &PullRequestSnapshot,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        for (status, issue_ids) in index.by_status() {
            let destinations = self.routes.destinations(&issue_ids);
            if destinations.is_empty() {
                tracing::info!("no webhook route matches {status} issues");
                continue;
            }

            for (url, matched) in destinations {
                if self.deliver(url, matched, status, base).await {
                    report.delivered += 1;
                } else {
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Sends one payload to `url`, returning whether it was accepted.
    async fn deliver(
        &self,
        url: &Url,
        matched: IssueIdSet,
        status: PullRequestStatus,
        base: &PullRequestSnapshot,
    ) -> bool {
        let issues = matched.to_strings().join(", ");
        let payload = WebhookPayload::new(matched, status, base);
        match self.sender.send(url, &payload).await {
            Ok(()) => {
                tracing::info!("notified {url} of {status} for {issues}");
                true
            }
            Err(error) => {
                tracing::warn!("webhook delivery failed: {error}");
                false
            }
        }
    }
}
