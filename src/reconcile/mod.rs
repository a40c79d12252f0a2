//! Cross-repository reconciliation of per-issue statuses.
//!
//! The base pull request seeds an [`IssueStatusIndex`]. Open pull requests in
//! each additional repository whose titles mention a tracked identifier are
//! resolved as well, and every identifier ends up with the most severe status
//! among all pull requests referencing it.

mod index;
mod reconciler;

#[cfg(test)]
mod tests;

pub use index::IssueStatusIndex;
pub use reconciler::{CrossRepoReconciler, ResolvedPullRequest};
