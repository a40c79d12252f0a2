//! Review and review-request listing.

use octocrab::Octocrab;

use crate::github::error::IntakeError;
use crate::github::locator::{PullRequestNumber, RepositorySlug};
use crate::github::models::{Account, ApiRequestedReviewers, ApiReview, Review, ReviewPage};

use super::MAX_PER_PAGE;
use super::client::get_page;
use super::error_mapping::map_octocrab_error;

/// Fetches the first page of reviews.
///
/// Exhaustive pagination is not attempted: a full page is reported through
/// [`ReviewPage::possibly_truncated`] instead.
pub(super) async fn fetch_reviews(
    client: &Octocrab,
    repository: &RepositorySlug,
    number: PullRequestNumber,
) -> Result<ReviewPage, IntakeError> {
    let route = repository.reviews_path(number);
    let reviews: Vec<ApiReview> =
        get_page(client, "pull request reviews", &route, 1, MAX_PER_PAGE, &[]).await?;

    let possibly_truncated = reviews.len() >= usize::from(MAX_PER_PAGE);
    Ok(ReviewPage {
        reviews: reviews.into_iter().map(Review::from).collect(),
        possibly_truncated,
    })
}

/// Fetches individually requested reviewers; team requests are dropped.
pub(super) async fn fetch_requested_reviewers(
    client: &Octocrab,
    repository: &RepositorySlug,
    number: PullRequestNumber,
) -> Result<Vec<Account>, IntakeError> {
    client
        .get::<ApiRequestedReviewers, _, _>(
            repository.requested_reviewers_path(number),
            None::<&()>,
        )
        .await
        .map(|requested| requested.users.into_iter().map(Account::from).collect())
        .map_err(|error| map_octocrab_error("requested reviewers", &error))
}
