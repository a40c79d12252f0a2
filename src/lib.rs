//! Herald library crate: pull request review status aggregation.
//!
//! The library extracts issue identifiers from pull request commits and
//! titles, resolves a single review status per pull request, reconciles
//! statuses per issue across repositories by severity, and notifies routed
//! webhooks of the result. GitHub access goes through Octocrab behind the
//! [`PullRequestGateway`] trait.

pub mod config;
pub mod error;
pub mod github;
pub mod issue;
pub mod reconcile;
pub mod review;
pub mod run;
pub mod status;
pub mod webhook;

pub use config::{HeraldConfig, RunSettings};
pub use error::RunError;
pub use github::{
    IntakeError, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestLocator,
};
pub use issue::{IssueIdSet, IssueIdentifier, IssuePattern};
pub use reconcile::IssueStatusIndex;
pub use run::{RunOutcome, StatusRun};
pub use status::PullRequestStatus;
pub use webhook::{DispatchReport, ReqwestWebhookSender, WebhookRoutes, WebhookSender};
