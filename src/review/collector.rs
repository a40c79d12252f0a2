//! Collects reviewer states for one pull request through a gateway.

use crate::github::{
    Account, AccountKind, IntakeError, PullRequestGateway, PullRequestNumber, RepositorySlug,
    Review,
};

use super::{ReviewerId, ReviewerState, ReviewerStates};

/// Fetches reviews and review requests and reduces them to
/// [`ReviewerStates`].
pub struct ReviewStateCollector<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ReviewStateCollector<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a collector using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Collects the latest state per reviewer for a pull request.
    ///
    /// A full first page of reviews is logged as possibly truncated and the
    /// computation proceeds on what was returned.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway.
    pub async fn collect(
        &self,
        repository: &RepositorySlug,
        number: PullRequestNumber,
    ) -> Result<ReviewerStates, IntakeError> {
        let page = self.client.list_reviews(repository, number).await?;
        if page.possibly_truncated {
            tracing::warn!(
                "reviews for {repository}{number} filled a whole page; later reviews may be \
                 missing and reviewer counts may be understated"
            );
        }
        let requested = self.client.list_requested_reviewers(repository, number).await?;

        Ok(reduce_reviews(page.reviews, &requested))
    }
}

/// Reduces reviews and outstanding requests to one state per reviewer.
///
/// Bot-authored and authorless reviews are dropped. Reviews are ordered by
/// submission time (stable, untimed reviews first) so the latest review per
/// reviewer wins regardless of upstream ordering. Requested users are added
/// as pending only when they hold no state yet; non-user requests are
/// ignored.
#[must_use]
pub fn reduce_reviews(mut reviews: Vec<Review>, requested: &[Account]) -> ReviewerStates {
    reviews.sort_by_key(|review| review.submitted_at);

    let mut states = ReviewerStates::default();
    for review in reviews {
        let Some(author) = review.author else {
            continue;
        };
        if author.kind == AccountKind::Bot {
            continue;
        }
        states.record_review(
            ReviewerId::new(author.id),
            ReviewerState::from_api(&review.state),
        );
    }

    for account in requested {
        if account.kind == AccountKind::User {
            states.record_request(ReviewerId::new(account.id));
        }
    }

    states
}
