// src/reconciler.rs
//! Preset group toggling with cross-group member protection
use crate::groups::GroupRegistry;
use crate::selection::SelectionStore;
use std::collections::HashSet;

/// Re-derive the set of fully satisfied preset groups from scratch.
///
/// A group is active exactly when every one of its members is present in
/// `current`. The result replaces any previous active set wholesale;
/// nothing is patched incrementally, so stale entries cannot survive.
pub fn recompute_active(registry: &GroupRegistry, current: &[String]) -> HashSet<String> {
    let selected: HashSet<&str> = current.iter().map(|s| s.as_str()).collect();
    registry
        .iter()
        .filter(|g| g.members.iter().all(|m| selected.contains(m.as_str())))
        .map(|g| g.name.clone())
        .collect()
}

/// Applies preset toggles to a [`SelectionStore`] and keeps the derived
/// active-group set in sync with the current selection.
#[derive(Debug, Clone)]
pub struct PresetReconciler {
    registry: GroupRegistry,
    active: HashSet<String>,
}

impl PresetReconciler {
    pub fn new(registry: GroupRegistry) -> Self {
        Self {
            registry,
            active: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    pub fn active(&self) -> &HashSet<String> {
        &self.active
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Recompute the active set after any selection mutation. Must be
    /// called whenever `store.current()` changed outside [`Self::toggle`].
    pub fn refresh(&mut self, store: &SelectionStore) {
        self.active = recompute_active(&self.registry, store.current());
    }

    /// Toggle preset `name` on or off against the store.
    ///
    /// Members that also belong to another currently active group are
    /// protected: they are dropped from the operand list so that turning
    /// one group off does not unvote delegates another group still needs.
    /// When the subtraction leaves nothing, the full member list is used
    /// instead. That fallback applies on activation as well, which can add
    /// fewer delegates than expected under partial overlap; the behavior
    /// is kept as-is for compatibility with existing ballots and is pinned
    /// by tests.
    ///
    /// Unknown group names are a no-op.
    pub fn toggle(&mut self, name: &str, store: &mut SelectionStore) {
        let members = match self.registry.members(name) {
            Some(m) => m.to_vec(),
            None => {
                log::warn!("toggle requested for unknown preset group: {}", name);
                return;
            }
        };

        // Decide activation first, from an explicit boolean, then apply.
        let will_be_active = !self.active.contains(name);

        let protected: HashSet<&str> = self
            .registry
            .iter()
            .filter(|g| g.name != name && self.active.contains(&g.name))
            .flat_map(|g| g.members.iter().map(|m| m.as_str()))
            .collect();

        let candidate: Vec<String> = members
            .iter()
            .filter(|m| !protected.contains(m.as_str()))
            .cloned()
            .collect();
        let operand = if candidate.is_empty() { members } else { candidate };

        if will_be_active {
            store.add_all(&operand);
        } else {
            store.remove_all(&operand);
        }

        log::debug!(
            "preset '{}' toggled {} ({} delegates affected)",
            name,
            if will_be_active { "on" } else { "off" },
            operand.len()
        );

        self.refresh(store);
    }
}
