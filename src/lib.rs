// src/lib.rs
//! Delegate ballot curation engine.
//!
//! Tracks a user's delegate selection against the ballot last observed on
//! a remote directory, computes the minimal ordered vote/unvote diff
//! between the two, and partitions it into capacity-bounded batches for
//! submission. Named preset groups can be toggled as a unit, with members
//! shared by other active groups protected from removal. A session-scoped
//! cache memoizes the remote directory's fixed-size pages and supports
//! sequential cross-page search with early termination.
//!
//! The crate is a library driven by a host UI: rendering, session
//! handling and the submission transport are the host's concern. The
//! directory is reached through the [`directory::DirectoryService`]
//! trait; [`directory::DirectoryClient`] is the stock HTTP
//! implementation.

pub mod cache;
pub mod constants;
pub mod delegate;
pub mod diff;
pub mod directory;
pub mod groups;
pub mod manager;
pub mod reconciler;
pub mod selection;

pub use cache::{CacheStats, DirectoryCache};
pub use delegate::{Delegate, DirectoryListing, DirectoryPage};
pub use diff::{build_batches, compute_diff, OperationBatch, VoteDiff, VoteItem, VoteKind};
pub use directory::{DirectoryClient, DirectoryService};
pub use groups::{GroupRegistry, GroupRegistryBuilder, PresetGroup};
pub use manager::VoteManager;
pub use reconciler::{recompute_active, PresetReconciler};
pub use selection::SelectionStore;
