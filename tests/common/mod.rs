use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use votedesk::{Delegate, DirectoryListing, DirectoryService};

/// In-memory directory double backed by one flat ranked delegate list.
///
/// `fetch_page` slices the list by offset/limit, so it works with any
/// page size the cache under test uses. Every fetched offset is recorded
/// in order, letting tests assert both scan order and fetch counts.
pub struct MockDirectory {
    delegates: Vec<Delegate>,
    ballots: HashMap<String, Vec<String>>,
    fetched_offsets: Mutex<Vec<usize>>,
    fail_next: AtomicBool,
}

impl MockDirectory {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delegates = usernames
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let mut dg = Delegate::new(name);
                dg.rank = i as u32 + 1;
                dg
            })
            .collect();
        Self {
            delegates,
            ballots: HashMap::new(),
            fetched_offsets: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn with_ballot<S: Into<String>>(mut self, address: &str, usernames: Vec<S>) -> Self {
        self.ballots.insert(
            address.to_string(),
            usernames.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Make the next fetch_page call fail with a transport-style error.
    pub fn fail_next_fetch(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Offsets passed to fetch_page, in call order.
    pub fn fetched_offsets(&self) -> Vec<usize> {
        self.fetched_offsets.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched_offsets.lock().unwrap().len()
    }
}

#[async_trait]
impl DirectoryService for MockDirectory {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<DirectoryListing> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("simulated directory outage");
        }
        self.fetched_offsets.lock().unwrap().push(offset);
        let end = (offset + limit).min(self.delegates.len());
        let delegates = if offset < self.delegates.len() {
            self.delegates[offset..end].to_vec()
        } else {
            Vec::new()
        };
        Ok(DirectoryListing {
            delegates,
            total_count: self.delegates.len(),
        })
    }

    async fn search_by_prefix(&self, query: &str) -> Result<Vec<Delegate>> {
        Ok(self
            .delegates
            .iter()
            .filter(|dg| dg.username.starts_with(query))
            .cloned()
            .collect())
    }

    async fn fetch_ballot(&self, address: &str) -> Result<Option<Vec<String>>> {
        Ok(self.ballots.get(address).cloned())
    }
}
