//! Paged commit message listing.

use octocrab::Octocrab;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestNumber, RepositorySlug};
use crate::github::models::ApiCommit;

use super::client::{get_page, validate_per_page};

/// Collects every commit message on a pull request.
///
/// Pages are requested sequentially; a page holding fewer than `per_page`
/// commits ends the walk.
pub(super) async fn fetch_commit_messages(
    client: &Octocrab,
    repository: &RepositorySlug,
    number: PullRequestNumber,
    per_page: u8,
) -> Result<Vec<String>, IntakeError> {
    validate_per_page(per_page)?;

    let route = repository.commits_path(number);
    let mut messages = Vec::new();
    let mut page = 1_u32;

    loop {
        let commits: Vec<ApiCommit> =
            get_page(client, "pull request commits", &route, page, per_page, &[]).await?;
        let fetched = commits.len();
        messages.extend(commits.into_iter().map(|commit| commit.commit.message));

        if fetched < usize::from(per_page) {
            break;
        }
        page = page.saturating_add(1);
    }

    Ok(messages)
}
