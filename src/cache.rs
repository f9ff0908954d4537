// src/cache.rs
//! Page cache over the remote delegate directory with cross-page search
use crate::delegate::{Delegate, DirectoryPage};
use crate::directory::DirectoryService;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes fixed-size directory pages by index for the session.
///
/// Pages are fetched at most once per index and never invalidated. The
/// total page count is derived from the reported total of page 1 only;
/// until page 1 has been fetched it is 1. Concurrent fetches of the same
/// uncached page are not deduplicated; insertion is last-write-wins,
/// which is harmless because repeated fetches return the same content.
pub struct DirectoryCache {
    service: Arc<dyn DirectoryService>,
    page_size: usize,
    pages: RwLock<HashMap<u32, DirectoryPage>>,
    total_pages: RwLock<u32>,
    stats: RwLock<CacheStats>,
}

impl DirectoryCache {
    pub fn new(service: Arc<dyn DirectoryService>, page_size: usize) -> Self {
        Self {
            service,
            page_size,
            pages: RwLock::new(HashMap::new()),
            total_pages: RwLock::new(1),
            stats: RwLock::new(CacheStats::default()),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Known page count; authoritative only once page 1 has been fetched.
    pub fn total_pages(&self) -> u32 {
        *self.total_pages.read().unwrap()
    }

    pub fn stats(&self) -> CacheStats {
        *self.stats.read().unwrap()
    }

    pub fn is_cached(&self, index: u32) -> bool {
        self.pages.read().unwrap().contains_key(&index)
    }

    /// Return page `index` (1-based), fetching and caching it on first use.
    /// An index of 0 is treated as page 1.
    ///
    /// A failed fetch leaves the cache untouched, so a later call retries
    /// the same page.
    pub async fn get_page(&self, index: u32) -> Result<DirectoryPage> {
        let index = index.max(1);
        if let Some(page) = self.pages.read().unwrap().get(&index) {
            self.stats.write().unwrap().hits += 1;
            return Ok(page.clone());
        }
        self.stats.write().unwrap().misses += 1;

        let offset = (index as usize - 1) * self.page_size;
        let listing = self.service.fetch_page(offset, self.page_size).await?;
        log::debug!(
            "fetched directory page {} ({} delegates, total {})",
            index,
            listing.delegates.len(),
            listing.total_count
        );

        if index == 1 && listing.total_count > 0 {
            *self.total_pages.write().unwrap() =
                derive_total_pages(listing.total_count, self.page_size);
        }

        let page = DirectoryPage {
            index,
            delegates: listing.delegates,
            total_count: listing.total_count,
        };
        self.pages
            .write()
            .unwrap()
            .insert(index, page.clone());
        Ok(page)
    }

    /// Scan pages in order, collecting delegates whose username is in the
    /// requested set, stopping as soon as every requested username has
    /// been found. Exhausting the directory first yields the partial
    /// result, not an error.
    pub async fn search_across_pages<S: AsRef<str>>(
        &self,
        usernames: &[S],
    ) -> Result<Vec<Delegate>> {
        let mut remaining: HashSet<&str> = usernames.iter().map(|u| u.as_ref()).collect();
        let mut found = Vec::new();

        let mut index = 1;
        // total_pages is re-read every iteration: fetching page 1 is what
        // establishes the real count.
        while index <= self.total_pages() && !remaining.is_empty() {
            let page = self.get_page(index).await?;
            for dg in &page.delegates {
                if remaining.remove(dg.username.as_str()) {
                    found.push(dg.clone());
                }
            }
            index += 1;
        }

        if !remaining.is_empty() {
            log::debug!(
                "cross-page search exhausted {} pages with {} usernames unmatched",
                self.total_pages(),
                remaining.len()
            );
        }
        Ok(found)
    }
}

/// Pages needed to hold `total_count` entries at `page_size` per page.
fn derive_total_pages(total_count: usize, page_size: usize) -> u32 {
    (1 + (total_count - 1) / page_size) as u32
}
