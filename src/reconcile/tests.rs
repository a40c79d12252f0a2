//! Unit tests for cross-repository reconciliation.

use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

use super::{CrossRepoReconciler, ResolvedPullRequest};
use crate::github::{
    Account, AccountKind, IntakeError, MockPullRequestGateway, PullRequestNumber,
    PullRequestSnapshot, RepositorySlug, Review, ReviewPage,
};
use crate::issue::{IssueIdentifier, IssuePattern};
use crate::status::{PullRequestStatus, ResolverSettings};

fn slug(raw: &str) -> RepositorySlug {
    RepositorySlug::parse(raw).expect("slug should parse")
}

fn snapshot(repository: &str, number: u64, title: &str) -> PullRequestSnapshot {
    PullRequestSnapshot {
        repository: slug(repository),
        number: PullRequestNumber::new(number).expect("number should be valid"),
        title: title.to_owned(),
        draft: false,
        merged: false,
        labels: Vec::new(),
    }
}

fn approval(id: u64) -> Review {
    Review {
        author: Some(Account {
            id,
            login: format!("user{id}"),
            kind: AccountKind::User,
        }),
        state: "APPROVED".to_owned(),
        submitted_at: None,
    }
}

fn id(raw: &str) -> IssueIdentifier {
    IssueIdentifier::new(raw)
}

#[fixture]
fn pattern() -> IssuePattern {
    IssuePattern::default()
}

#[fixture]
fn base() -> ResolvedPullRequest {
    let snapshot = snapshot("octo/api", 1, "XYZ-1 add endpoint");
    ResolvedPullRequest {
        issue_ids: std::iter::once(id("XYZ-1")).collect(),
        snapshot,
        status: PullRequestStatus::Approved,
    }
}

fn expect_no_reviews(gateway: &mut MockPullRequestGateway, times: usize) {
    gateway
        .expect_list_reviews()
        .times(times)
        .returning(|_, _| Ok(ReviewPage::default()));
    gateway
        .expect_list_requested_reviewers()
        .times(times)
        .returning(|_, _| Ok(Vec::new()));
}

#[rstest]
#[tokio::test]
async fn lowers_status_to_other_repository_in_review(
    pattern: IssuePattern,
    base: ResolvedPullRequest,
) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .with(eq(slug("octo/web")), eq(30))
        .times(1)
        .returning(|_, _| Ok(vec![snapshot("octo/web", 4, "XYZ-1 wire up UI")]));
    expect_no_reviews(&mut gateway, 1);

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[slug("octo/web")], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.get(&id("XYZ-1")), Some(PullRequestStatus::InReview));
}

#[rstest]
#[tokio::test]
async fn untracked_identifiers_are_never_added(pattern: IssuePattern, base: ResolvedPullRequest) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                snapshot("octo/web", 4, "NEW-7 unrelated work"),
                snapshot("octo/web", 5, "XYZ-1 and NEW-8 together"),
            ])
        });
    gateway
        .expect_list_reviews()
        .times(1)
        .returning(|_, _| {
            Ok(ReviewPage {
                reviews: vec![approval(1)],
                possibly_truncated: false,
            })
        });
    gateway
        .expect_list_requested_reviewers()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[slug("octo/web")], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.len(), 1);
    assert!(!index.contains(&id("NEW-7")));
    assert!(!index.contains(&id("NEW-8")));
    assert_eq!(index.get(&id("XYZ-1")), Some(PullRequestStatus::Approved));
}

#[rstest]
#[tokio::test]
async fn pull_request_is_resolved_once_per_run(pattern: IssuePattern) {
    let base = ResolvedPullRequest {
        snapshot: snapshot("octo/api", 1, "ABC-1 ABC-2"),
        issue_ids: [id("ABC-1"), id("ABC-2")].into_iter().collect(),
        status: PullRequestStatus::Merged,
    };
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .times(2)
        .returning(|_, _| Ok(vec![snapshot("octo/web", 9, "ABC-1 ABC-2 shared")]));
    expect_no_reviews(&mut gateway, 1);

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[slug("octo/web"), slug("octo/web")], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.get(&id("ABC-1")), Some(PullRequestStatus::InReview));
    assert_eq!(index.get(&id("ABC-2")), Some(PullRequestStatus::InReview));
}

#[rstest]
#[tokio::test]
async fn base_pull_request_in_listing_is_not_resolved_again(
    pattern: IssuePattern,
    base: ResolvedPullRequest,
) {
    let listed = base.snapshot.clone();
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .times(1)
        .returning(move |_, _| Ok(vec![listed.clone()]));
    gateway.expect_list_reviews().never();
    gateway.expect_list_requested_reviewers().never();

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[slug("octo/api")], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.get(&id("XYZ-1")), Some(PullRequestStatus::Approved));
}

#[rstest]
#[tokio::test]
async fn draft_in_other_repository_wins(pattern: IssuePattern, base: ResolvedPullRequest) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .times(1)
        .returning(|_, _| {
            let mut draft = snapshot("octo/web", 2, "XYZ-1 wip");
            draft.draft = true;
            Ok(vec![draft, snapshot("octo/web", 3, "XYZ-1 follow up")])
        });
    expect_no_reviews(&mut gateway, 2);

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[slug("octo/web")], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.get(&id("XYZ-1")), Some(PullRequestStatus::Draft));
}

#[rstest]
#[tokio::test]
async fn no_additional_repositories_keeps_base_status(
    pattern: IssuePattern,
    base: ResolvedPullRequest,
) {
    let mut gateway = MockPullRequestGateway::new();
    gateway.expect_list_pull_requests().never();

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let index = reconciler
        .reconcile(&base, &[], 30)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(index.get(&id("XYZ-1")), Some(PullRequestStatus::Approved));
}

#[rstest]
#[tokio::test]
async fn gateway_failure_is_propagated(pattern: IssuePattern, base: ResolvedPullRequest) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .with(always(), always())
        .times(1)
        .returning(|_, _| {
            Err(IntakeError::Api {
                message: "boom".to_owned(),
            })
        });

    let mut reconciler =
        CrossRepoReconciler::new(&gateway, &pattern, ResolverSettings::default());
    let result = reconciler.reconcile(&base, &[slug("octo/web")], 30).await;

    assert_eq!(
        result,
        Err(IntakeError::Api {
            message: "boom".to_owned(),
        })
    );
}
