//! Per-issue status index.

use std::collections::{BTreeMap, HashMap};

use crate::issue::{IssueIdSet, IssueIdentifier};
use crate::status::PullRequestStatus;

/// Best-known (most severe) status per tracked issue identifier.
///
/// The tracked identifiers are fixed when the index is seeded; merging a
/// status for an unknown identifier is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueStatusIndex {
    order: Vec<IssueIdentifier>,
    statuses: HashMap<IssueIdentifier, PullRequestStatus>,
}

impl IssueStatusIndex {
    /// Seeds the index with every identifier at `status`.
    #[must_use]
    pub fn seeded(issue_ids: &IssueIdSet, status: PullRequestStatus) -> Self {
        let mut index = Self::default();
        for id in issue_ids {
            if index.statuses.insert(id.clone(), status).is_none() {
                index.order.push(id.clone());
            }
        }
        index
    }

    /// Returns true when `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: &IssueIdentifier) -> bool {
        self.statuses.contains_key(id)
    }

    /// Current status of `id`.
    #[must_use]
    pub fn get(&self, id: &IssueIdentifier) -> Option<PullRequestStatus> {
        self.statuses.get(id).copied()
    }

    /// Lowers the status of a tracked identifier to `status` when that is
    /// more severe. Returns true when the stored status changed.
    pub fn merge(&mut self, id: &IssueIdentifier, status: PullRequestStatus) -> bool {
        let Some(current) = self.statuses.get_mut(id) else {
            return false;
        };
        let merged = current.most_severe(status);
        let changed = merged != *current;
        *current = merged;
        changed
    }

    /// Number of tracked identifiers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true when nothing is tracked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates identifiers with their status in seeding order.
    pub fn iter(&self) -> impl Iterator<Item = (&IssueIdentifier, PullRequestStatus)> {
        self.order
            .iter()
            .filter_map(|id| self.statuses.get(id).map(|status| (id, *status)))
    }

    /// Inverts the index: identifiers grouped by their current status.
    #[must_use]
    pub fn by_status(&self) -> BTreeMap<PullRequestStatus, IssueIdSet> {
        let mut groups: BTreeMap<PullRequestStatus, IssueIdSet> = BTreeMap::new();
        for (id, status) in self.iter() {
            groups.entry(status).or_default().insert(id.clone());
        }
        groups
    }
}
