// src/manager.rs
use crate::cache::{CacheStats, DirectoryCache};
use crate::constants;
use crate::delegate::{Delegate, DirectoryPage};
use crate::diff::{build_batches, compute_diff, OperationBatch, VoteDiff};
use crate::directory::DirectoryService;
use crate::groups::GroupRegistry;
use crate::reconciler::PresetReconciler;
use crate::selection::SelectionStore;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// One user's ballot-editing session.
///
/// Owns the selection store, the preset reconciler and a directory cache,
/// and exposes the operations a host UI drives: loading an existing
/// ballot, toggling delegates and presets, import/export, page
/// select/deselect and batch generation. All selection mutation is
/// synchronous; only directory access suspends.
pub struct VoteManager {
    store: SelectionStore,
    reconciler: PresetReconciler,
    cache: DirectoryCache,
    service: Arc<dyn DirectoryService>,
}

impl VoteManager {
    pub fn new(registry: GroupRegistry, service: Arc<dyn DirectoryService>) -> Self {
        Self {
            store: SelectionStore::new(),
            reconciler: PresetReconciler::new(registry),
            cache: DirectoryCache::new(service.clone(), constants::MAX_ALLOWED_VOTES),
            service,
        }
    }

    // === State access ===

    pub fn selection(&self) -> &SelectionStore {
        &self.store
    }

    pub fn active_presets(&self) -> &HashSet<String> {
        self.reconciler.active()
    }

    pub fn is_selected(&self, username: &str) -> bool {
        self.store.contains(username)
    }

    /// The external ceiling on ballot size. The diff engine itself never
    /// enforces this; the host decides what to do when it is exceeded.
    pub fn is_within_vote_limit(&self) -> bool {
        self.store.len() <= constants::MAX_ALLOWED_VOTES
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // === Ballot loading ===

    /// Load the ballot recorded for `address` and make it both baseline
    /// and current selection. Returns false when the directory has no
    /// ballot for the address, leaving the session state untouched.
    pub async fn load_ballot_for_address(&mut self, address: &str) -> Result<bool> {
        match self.service.fetch_ballot(address).await? {
            Some(usernames) => {
                log::info!("loaded ballot for {} ({} votes)", address, usernames.len());
                self.store.load_baseline(usernames);
                self.reconciler.refresh(&self.store);
                Ok(true)
            }
            None => {
                log::info!("no ballot recorded for {}", address);
                Ok(false)
            }
        }
    }

    // === Selection mutation ===

    pub fn toggle_delegate(&mut self, username: &str) {
        self.store.toggle_one(username);
        self.reconciler.refresh(&self.store);
    }

    pub fn toggle_preset(&mut self, name: &str) {
        self.reconciler.toggle(name, &mut self.store);
    }

    pub fn restore(&mut self) {
        self.store.restore_to_baseline();
        self.reconciler.refresh(&self.store);
    }

    pub fn clear_all(&mut self) {
        self.store.clear();
        self.reconciler.refresh(&self.store);
    }

    /// Replace the selection with a registry group's full member list,
    /// e.g. a payout-optimized preset. Unknown names are a no-op.
    pub fn select_optimized(&mut self, name: &str) {
        let members = match self.reconciler.registry().members(name) {
            Some(m) => m.to_vec(),
            None => {
                log::warn!(
                    "select_optimized requested for unknown preset group: {}",
                    name
                );
                return;
            }
        };
        self.store.replace_all(members);
        self.reconciler.refresh(&self.store);
    }

    /// Import a comma-separated username list, replacing the selection.
    /// Entries are trimmed and de-duplicated; empties are dropped. No
    /// existence check against the directory is performed here.
    pub fn import_votes(&mut self, text: &str) {
        let usernames: Vec<&str> = text
            .split(',')
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();
        self.store.replace_all(usernames);
        self.reconciler.refresh(&self.store);
    }

    /// Export the current selection as a comma-separated list.
    pub fn export_votes(&self) -> String {
        self.store.current().join(",")
    }

    // === Directory access ===

    pub async fn get_page(&self, index: u32) -> Result<DirectoryPage> {
        self.cache.get_page(index).await
    }

    pub fn total_pages(&self) -> u32 {
        self.cache.total_pages()
    }

    pub async fn search_by_prefix(&self, query: &str) -> Result<Vec<Delegate>> {
        self.service.search_by_prefix(query).await
    }

    /// Locate a preset group's members in the directory by scanning pages
    /// in order. Partial results are valid: members the directory no
    /// longer lists are simply absent.
    pub async fn show_group(&self, name: &str) -> Result<Vec<Delegate>> {
        match self.reconciler.registry().members(name) {
            Some(members) => self.cache.search_across_pages(members).await,
            None => Ok(Vec::new()),
        }
    }

    /// Add every delegate on the given page to the selection.
    pub async fn select_page(&mut self, index: u32) -> Result<()> {
        let page = self.cache.get_page(index).await?;
        self.store
            .add_all(page.delegates.iter().map(|dg| dg.username.as_str()));
        self.reconciler.refresh(&self.store);
        Ok(())
    }

    /// Remove every delegate on the given page from the selection.
    pub async fn deselect_page(&mut self, index: u32) -> Result<()> {
        let page = self.cache.get_page(index).await?;
        self.store
            .remove_all(page.delegates.iter().map(|dg| dg.username.as_str()));
        self.reconciler.refresh(&self.store);
        Ok(())
    }

    // === Batch generation ===

    /// Ordered vote/unvote difference between the baseline ballot and the
    /// current selection.
    pub fn diff(&self) -> VoteDiff {
        compute_diff(self.store.baseline(), self.store.current())
    }

    /// The batches the ballot channel should submit, in order, each
    /// holding at most [`constants::BATCH_CAPACITY`] operations.
    pub fn batches(&self) -> Vec<OperationBatch> {
        build_batches(&self.diff(), constants::BATCH_CAPACITY)
    }
}
