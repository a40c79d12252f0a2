//! Run configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach, plus [`RunSettings`], the
//! validated form the status run consumes.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults
//! 2. **Configuration file** – `.herald.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `HERALD_*`, plus `GITHUB_TOKEN` and
//!    `GITHUB_EVENT_PATH` as fallbacks
//! 4. **Command-line arguments** – `--pr-url`/`-u`, `--token`/`-t`, and the
//!    kebab-case form of every other field
//!
//! # Configuration File
//!
//! ```toml
//! pr_url = "https://github.com/octo/api/pull/12"
//! approval_threshold = "50%"
//! force_changes_requested = true
//! webhook_urls = """
//! ABC:https://hooks.example/abc
//! *:https://hooks.example/all
//! """
//! additional_repositories = "octo/web, octo/mobile"
//! ```

mod event;
mod settings;

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::github::IntakeError;
use crate::issue::DEFAULT_ISSUE_PATTERN;

pub use event::read_pull_request_url;
pub use settings::RunSettings;

const DEFAULT_APPROVAL_THRESHOLD: &str = "1";
const DEFAULT_PULL_REQUEST_LIMIT: u32 = 30;
const DEFAULT_COMMITS_PER_PAGE: u32 = 100;

/// Configuration supporting CLI, environment, and file sources.
///
/// Boolean flags are read from the CLI and configuration files only, as
/// `ortho_config` does not load boolean values from the environment.
///
/// # Example
///
/// ```no_run
/// use herald::HeraldConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = HeraldConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "HERALD",
    discovery(
        dotfile_name = ".herald.toml",
        config_file_name = "herald.toml",
        app_name = "herald"
    )
)]
pub struct HeraldConfig {
    /// URL of the pull request to report on.
    ///
    /// Takes precedence over the event payload at `event_path`.
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Personal access token; falls back to `GITHUB_TOKEN`.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Path to the JSON payload of the triggering event; falls back to
    /// `GITHUB_EVENT_PATH`. The pull request URL is read from
    /// `pull_request.html_url`.
    #[ortho_config(cli_short = 'e')]
    pub event_path: Option<String>,

    /// Skips scanning the pull request title for issue identifiers.
    #[ortho_config()]
    pub ignore_title: bool,

    /// Skips scanning commit messages for issue identifiers.
    #[ortho_config()]
    pub ignore_commits: bool,

    /// Approvals required: an absolute count (`2`) or a percentage of all
    /// involved reviewers with at most two decimals (`50%`, `66.67%`).
    #[ortho_config()]
    pub approval_threshold: String,

    /// Reports changes requested whenever any reviewer requests changes,
    /// even when the approval threshold is met.
    #[ortho_config()]
    pub force_changes_requested: bool,

    /// Delimited pattern (`/body/flags`) applied to commit messages.
    #[ortho_config()]
    pub find_regex_commits: String,

    /// Delimited pattern (`/body/flags`) applied to pull request titles,
    /// including titles in additional repositories.
    #[ortho_config()]
    pub find_regex_title: String,

    /// Newline-separated `prefix:url` routes; `*` matches every identifier.
    #[ortho_config()]
    pub webhook_urls: Option<String>,

    /// Comma-separated `owner/repo` list scanned for related pull requests.
    #[ortho_config()]
    pub additional_repositories: Option<String>,

    /// Open pull requests listed per additional repository.
    #[ortho_config()]
    pub additional_repositories_pull_request_limit: u32,

    /// Page size used when listing commits (1 to 100).
    #[ortho_config()]
    pub commits_per_page: u32,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            pr_url: None,
            token: None,
            event_path: None,
            ignore_title: false,
            ignore_commits: false,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD.to_owned(),
            force_changes_requested: false,
            find_regex_commits: DEFAULT_ISSUE_PATTERN.to_owned(),
            find_regex_title: DEFAULT_ISSUE_PATTERN.to_owned(),
            webhook_urls: None,
            additional_repositories: None,
            additional_repositories_pull_request_limit: DEFAULT_PULL_REQUEST_LIMIT,
            commits_per_page: DEFAULT_COMMITS_PER_PAGE,
        }
    }
}

impl HeraldConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(IntakeError::MissingToken)
    }

    /// Resolves the event payload path from configuration or the
    /// `GITHUB_EVENT_PATH` environment variable.
    #[must_use]
    pub fn resolve_event_path(&self) -> Option<Utf8PathBuf> {
        self.event_path
            .clone()
            .or_else(|| env::var("GITHUB_EVENT_PATH").ok())
            .filter(|path| !path.trim().is_empty())
            .map(Utf8PathBuf::from)
    }

    /// Resolves the base pull request URL.
    ///
    /// An explicit `pr_url` wins; otherwise the URL is read from the event
    /// payload.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] when neither source names a pull
    /// request, and [`RunError::Io`] when the event payload cannot be read.
    pub fn resolve_pr_url(&self) -> Result<String, RunError> {
        let explicit = self
            .pr_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = explicit {
            return Ok(url.to_owned());
        }

        let Some(path) = self.resolve_event_path() else {
            return Err(RunError::configuration(
                "pull request URL is required (use --pr-url, HERALD_PR_URL, or GITHUB_EVENT_PATH)",
            ));
        };
        read_pull_request_url(&path)
    }
}

#[cfg(test)]
mod tests;
