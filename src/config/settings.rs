//! Validated settings for a status run.

use crate::error::RunError;
use crate::github::{MAX_PER_PAGE, RepositorySlug};
use crate::issue::IssuePattern;
use crate::status::{ApprovalThreshold, ResolverSettings};
use crate::webhook::WebhookRoutes;

use super::HeraldConfig;

/// Strongly typed form of [`HeraldConfig`].
///
/// Building settings performs every configuration check, so a run that
/// starts with valid settings cannot fail on configuration later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Pattern applied to commit messages of the base pull request.
    pub commit_pattern: IssuePattern,
    /// Pattern applied to pull request titles.
    pub title_pattern: IssuePattern,
    /// Skip the base pull request title.
    pub ignore_title: bool,
    /// Skip the base pull request commits.
    pub ignore_commits: bool,
    /// Threshold and change-request policy.
    pub resolver: ResolverSettings,
    /// Webhook routes in configuration order.
    pub routes: WebhookRoutes,
    /// Repositories scanned for related pull requests, in order.
    pub additional_repositories: Vec<RepositorySlug>,
    /// Open pull requests listed per additional repository.
    pub pull_request_limit: u32,
    /// Page size for commit listing.
    pub commits_per_page: u8,
}

impl RunSettings {
    /// Validates `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] for the first malformed value.
    pub fn from_config(config: &HeraldConfig) -> Result<Self, RunError> {
        let threshold: ApprovalThreshold = config.approval_threshold.parse()?;
        let routes = config
            .webhook_urls
            .as_deref()
            .map_or_else(|| Ok(WebhookRoutes::default()), WebhookRoutes::parse)?;
        let additional_repositories = config
            .additional_repositories
            .as_deref()
            .map_or_else(|| Ok(Vec::new()), parse_repositories)?;

        if config.additional_repositories_pull_request_limit == 0 {
            return Err(RunError::configuration(
                "additional_repositories_pull_request_limit must be at least 1",
            ));
        }

        Ok(Self {
            commit_pattern: IssuePattern::parse(&config.find_regex_commits)?,
            title_pattern: IssuePattern::parse(&config.find_regex_title)?,
            ignore_title: config.ignore_title,
            ignore_commits: config.ignore_commits,
            resolver: ResolverSettings {
                threshold,
                force_changes_requested: config.force_changes_requested,
            },
            routes,
            additional_repositories,
            pull_request_limit: config.additional_repositories_pull_request_limit,
            commits_per_page: commits_per_page(config.commits_per_page)?,
        })
    }
}

fn parse_repositories(raw: &str) -> Result<Vec<RepositorySlug>, RunError> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            RepositorySlug::parse(entry).map_err(|error| {
                RunError::configuration(format!(
                    "additional repository {entry:?} is invalid: {error}"
                ))
            })
        })
        .collect()
}

fn commits_per_page(value: u32) -> Result<u8, RunError> {
    u8::try_from(value)
        .ok()
        .filter(|per_page| (1..=MAX_PER_PAGE).contains(per_page))
        .ok_or_else(|| {
            RunError::configuration(format!(
                "commits_per_page must be between 1 and {MAX_PER_PAGE}, got {value}"
            ))
        })
}
