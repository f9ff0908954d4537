// src/selection.rs
//! Selection store: baseline ballot vs. the user's working selection
use std::collections::HashSet;

/// Tracks the originally observed ballot (`baseline`) and the user's
/// current working selection (`current`).
///
/// Both lists are duplicate-free. `current` preserves the order in which
/// usernames were added, which is what makes generated vote batches
/// reproducible across runs. `baseline` is only ever written by
/// [`SelectionStore::load_baseline`].
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    baseline: Vec<String>,
    current: Vec<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> &[String] {
        &self.baseline
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn contains(&self, username: &str) -> bool {
        self.current.iter().any(|u| u == username)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Flip membership of a single delegate: add if absent, remove if present.
    pub fn toggle_one(&mut self, username: &str) {
        if self.contains(username) {
            self.current.retain(|u| u != username);
        } else {
            self.current.push(username.to_string());
        }
    }

    /// Add every given username that is not already selected, in order.
    pub fn add_all<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for username in usernames {
            let username = username.as_ref();
            if !self.contains(username) {
                self.current.push(username.to_string());
            }
        }
    }

    /// Remove every given username from the current selection.
    pub fn remove_all<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let drop: HashSet<String> = usernames
            .into_iter()
            .map(|u| u.as_ref().to_string())
            .collect();
        self.current.retain(|u| !drop.contains(u));
    }

    /// Bulk-replace the current selection with a de-duplicated copy of the
    /// given list, preserving first-occurrence order.
    pub fn replace_all<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.current.clear();
        self.add_all(usernames);
    }

    /// Reset the working selection to the baseline ballot.
    pub fn restore_to_baseline(&mut self) {
        self.current = self.baseline.clone();
    }

    /// Empty the working selection.
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Establish the baseline ballot for this session and start the working
    /// selection from it. The only operation allowed to write `baseline`.
    pub fn load_baseline<I, S>(&mut self, usernames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.current.clear();
        self.add_all(usernames);
        self.baseline = self.current.clone();
    }
}
