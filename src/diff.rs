// src/diff.rs
//! Vote/unvote diffing and capacity-bounded batch building
use std::collections::HashSet;

/// Direction of a single ballot operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Vote,
    Unvote,
}

/// One vote or unvote targeting a single delegate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteItem {
    pub kind: VoteKind,
    pub username: String,
}

impl VoteItem {
    pub fn vote(username: impl Into<String>) -> Self {
        Self {
            kind: VoteKind::Vote,
            username: username.into(),
        }
    }

    pub fn unvote(username: impl Into<String>) -> Self {
        Self {
            kind: VoteKind::Unvote,
            username: username.into(),
        }
    }
}

/// Ordered vote/unvote difference between a baseline ballot and the
/// current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteDiff {
    /// Members of `current` missing from `baseline`, in `current` order
    pub to_vote: Vec<String>,
    /// Members of `baseline` missing from `current`, in `baseline` order
    pub to_unvote: Vec<String>,
}

impl VoteDiff {
    pub fn is_empty(&self) -> bool {
        self.to_vote.is_empty() && self.to_unvote.is_empty()
    }
}

/// A capacity-bounded group of vote/unvote operations meant to be
/// submitted to the ballot channel as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBatch {
    pub items: Vec<VoteItem>,
}

impl OperationBatch {
    pub fn votes(&self) -> impl Iterator<Item = &VoteItem> {
        self.items.iter().filter(|it| it.kind == VoteKind::Vote)
    }

    pub fn unvotes(&self) -> impl Iterator<Item = &VoteItem> {
        self.items.iter().filter(|it| it.kind == VoteKind::Unvote)
    }

    /// Human-readable net summary of this batch: "-2, +3", "-2" or "+3".
    pub fn summary(&self) -> String {
        let unvotes = self.unvotes().count();
        let votes = self.votes().count();
        match (unvotes, votes) {
            (0, v) => format!("+{}", v),
            (u, 0) => format!("-{}", u),
            (u, v) => format!("-{}, +{}", u, v),
        }
    }
}

/// Compute the ordered diff between `baseline` and `current`.
///
/// Ordering matters: batches generated from the same two selections must
/// come out identical run to run, so `to_vote` follows the insertion order
/// of `current` and `to_unvote` follows `baseline` order.
pub fn compute_diff(baseline: &[String], current: &[String]) -> VoteDiff {
    let baseline_set: HashSet<&str> = baseline.iter().map(|s| s.as_str()).collect();
    let current_set: HashSet<&str> = current.iter().map(|s| s.as_str()).collect();

    let to_vote = current
        .iter()
        .filter(|u| !baseline_set.contains(u.as_str()))
        .cloned()
        .collect();
    let to_unvote = baseline
        .iter()
        .filter(|u| !current_set.contains(u.as_str()))
        .cloned()
        .collect();

    VoteDiff { to_vote, to_unvote }
}

/// Partition a diff into consecutive batches of at most `capacity` items.
///
/// Unvotes come first, then votes, both preserving diff order; the last
/// batch may be short. An empty diff yields no batches at all.
pub fn build_batches(diff: &VoteDiff, capacity: usize) -> Vec<OperationBatch> {
    let combined: Vec<VoteItem> = diff
        .to_unvote
        .iter()
        .map(|u| VoteItem::unvote(u.clone()))
        .chain(diff.to_vote.iter().map(|u| VoteItem::vote(u.clone())))
        .collect();

    combined
        .chunks(capacity)
        .map(|chunk| OperationBatch {
            items: chunk.to_vec(),
        })
        .collect()
}
