//! Resolves a single status from a snapshot and its reviewer states.

use super::{ApprovalThreshold, PullRequestStatus};
use crate::github::PullRequestSnapshot;
use crate::issue::IssueIdSet;
use crate::review::{ReviewerState, ReviewerStates};

/// Settings that influence status resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverSettings {
    /// Approvals required for [`PullRequestStatus::Approved`].
    pub threshold: ApprovalThreshold,
    /// When set, any outstanding change request wins over a met threshold.
    pub force_changes_requested: bool,
}

/// Resolves the status of a pull request.
///
/// Returns `None` when the pull request references no tracked issue, which
/// means there is nothing to report for it. Otherwise the first matching
/// rule wins: merged, draft, forced change request, threshold met, any
/// change request, and finally in review.
#[must_use]
pub fn resolve(
    snapshot: &PullRequestSnapshot,
    reviewers: &ReviewerStates,
    issue_ids: &IssueIdSet,
    settings: &ResolverSettings,
) -> Option<PullRequestStatus> {
    if issue_ids.is_empty() {
        return None;
    }

    if snapshot.merged {
        return Some(PullRequestStatus::Merged);
    }
    if snapshot.draft {
        return Some(PullRequestStatus::Draft);
    }

    let approvals = reviewers.count(&ReviewerState::Approved);
    let changes_requested = reviewers.count(&ReviewerState::ChangesRequested);

    if settings.force_changes_requested && changes_requested > 0 {
        return Some(PullRequestStatus::ChangesRequested);
    }

    let status = if settings.threshold.is_met(approvals, reviewers.len()) {
        PullRequestStatus::Approved
    } else if changes_requested > 0 {
        PullRequestStatus::ChangesRequested
    } else {
        PullRequestStatus::InReview
    };
    Some(status)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{ResolverSettings, resolve};
    use crate::github::{PullRequestNumber, PullRequestSnapshot, RepositorySlug};
    use crate::issue::{IssueIdSet, IssueIdentifier};
    use crate::review::{ReviewerId, ReviewerState, ReviewerStates};
    use crate::status::PullRequestStatus;

    #[fixture]
    fn snapshot() -> PullRequestSnapshot {
        PullRequestSnapshot {
            repository: RepositorySlug::parse("octo/widgets").expect("slug should parse"),
            number: PullRequestNumber::new(1).expect("number should be valid"),
            title: "ABC-1 widget".to_owned(),
            draft: false,
            merged: false,
            labels: Vec::new(),
        }
    }

    #[fixture]
    fn issue_ids() -> IssueIdSet {
        std::iter::once(IssueIdentifier::new("ABC-1")).collect()
    }

    fn reviewers(states: &[(u64, ReviewerState)]) -> ReviewerStates {
        states
            .iter()
            .map(|(id, state)| (ReviewerId::new(*id), state.clone()))
            .collect()
    }

    fn settings(threshold: &str, force_changes_requested: bool) -> ResolverSettings {
        ResolverSettings {
            threshold: threshold.parse().expect("threshold should parse"),
            force_changes_requested,
        }
    }

    #[rstest]
    fn no_issue_ids_means_nothing_to_report(snapshot: PullRequestSnapshot) {
        let result = resolve(
            &snapshot,
            &ReviewerStates::default(),
            &IssueIdSet::default(),
            &ResolverSettings::default(),
        );

        assert_eq!(result, None);
    }

    #[rstest]
    fn merged_wins_over_draft(mut snapshot: PullRequestSnapshot, issue_ids: IssueIdSet) {
        snapshot.merged = true;
        snapshot.draft = true;

        let result = resolve(
            &snapshot,
            &ReviewerStates::default(),
            &issue_ids,
            &ResolverSettings::default(),
        );

        assert_eq!(result, Some(PullRequestStatus::Merged));
    }

    #[rstest]
    fn draft_wins_over_approvals(mut snapshot: PullRequestSnapshot, issue_ids: IssueIdSet) {
        snapshot.draft = true;
        let states = reviewers(&[(1, ReviewerState::Approved)]);

        let result = resolve(&snapshot, &states, &issue_ids, &settings("1", false));

        assert_eq!(result, Some(PullRequestStatus::Draft));
    }

    #[rstest]
    fn count_threshold_ignores_pending_reviewers(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let states = reviewers(&[
            (1, ReviewerState::Approved),
            (2, ReviewerState::Approved),
            (3, ReviewerState::Pending),
        ]);

        let result = resolve(&snapshot, &states, &issue_ids, &settings("2", false));

        assert_eq!(result, Some(PullRequestStatus::Approved));
    }

    #[rstest]
    fn percentage_threshold_counts_pending_reviewers(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let states = reviewers(&[(1, ReviewerState::Approved), (2, ReviewerState::Pending)]);

        let result = resolve(&snapshot, &states, &issue_ids, &settings("50%", false));

        assert_eq!(result, Some(PullRequestStatus::Approved));
    }

    #[rstest]
    fn percentage_threshold_below_target_stays_in_review(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let states = reviewers(&[
            (1, ReviewerState::Approved),
            (2, ReviewerState::Pending),
            (3, ReviewerState::Other("COMMENTED".to_owned())),
        ]);

        let result = resolve(&snapshot, &states, &issue_ids, &settings("50%", false));

        assert_eq!(result, Some(PullRequestStatus::InReview));
    }

    #[rstest]
    fn percentage_threshold_without_reviewers_is_not_approved(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let result = resolve(
            &snapshot,
            &ReviewerStates::default(),
            &issue_ids,
            &settings("0%", false),
        );

        assert_eq!(result, Some(PullRequestStatus::InReview));
    }

    #[rstest]
    fn forced_change_request_overrides_met_threshold(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let states = reviewers(&[
            (1, ReviewerState::Approved),
            (2, ReviewerState::Approved),
            (3, ReviewerState::ChangesRequested),
        ]);

        let forced = resolve(&snapshot, &states, &issue_ids, &settings("2", true));
        let unforced = resolve(&snapshot, &states, &issue_ids, &settings("2", false));

        assert_eq!(forced, Some(PullRequestStatus::ChangesRequested));
        assert_eq!(unforced, Some(PullRequestStatus::Approved));
    }

    #[rstest]
    fn unmet_threshold_with_change_request_is_changes_requested(
        snapshot: PullRequestSnapshot,
        issue_ids: IssueIdSet,
    ) {
        let states = reviewers(&[
            (1, ReviewerState::Approved),
            (2, ReviewerState::ChangesRequested),
        ]);

        let result = resolve(&snapshot, &states, &issue_ids, &settings("2", false));

        assert_eq!(result, Some(PullRequestStatus::ChangesRequested));
    }

    #[rstest]
    fn resolution_is_deterministic(snapshot: PullRequestSnapshot, issue_ids: IssueIdSet) {
        let states = reviewers(&[(1, ReviewerState::Approved), (2, ReviewerState::Pending)]);
        let config = settings("75%", false);

        let first = resolve(&snapshot, &states, &issue_ids, &config);
        let second = resolve(&snapshot, &states, &issue_ids, &config);

        assert_eq!(first, second);
    }
}
