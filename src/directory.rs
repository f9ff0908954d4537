// Directory client - HTTP client for the remote delegate directory API
use crate::constants;
use crate::delegate::{Delegate, DirectoryListing};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Remote delegate directory.
///
/// The engine only ever calls `fetch_page` with `limit` equal to
/// [`constants::MAX_ALLOWED_VOTES`]. Implementations are expected to be
/// stateless from the caller's point of view; retry policy, if any, lives
/// behind this trait, not in front of it.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch one slice of the ranked delegate listing.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<DirectoryListing>;

    /// Search delegates whose username starts with `query`.
    async fn search_by_prefix(&self, query: &str) -> Result<Vec<Delegate>>;

    /// Fetch the ballot currently recorded for an account address.
    /// Returns `None` when the directory has no ballot for the address.
    async fn fetch_ballot(&self, address: &str) -> Result<Option<Vec<String>>>;
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    delegates: Vec<Delegate>,
    #[serde(rename = "totalCount", default)]
    total_count: usize,
}

#[derive(Debug, Deserialize)]
struct BallotResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    delegates: Vec<Delegate>,
}

/// HTTP implementation of [`DirectoryService`] against a Lisk-style
/// delegate API.
pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(constants::HTTP_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("User-Agent", constants::user_agent())
            .send()
            .await
            .with_context(|| format!("Failed to reach directory at {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Directory request failed: {}", response.status());
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<DirectoryListing> {
        let url = format!(
            "{}/api/delegates?limit={}&offset={}",
            self.base_url, limit, offset
        );
        let body = self.get_text(&url).await?;
        let parsed: ListingResponse =
            sonic_rs::from_str(&body).context("Failed to parse delegate listing")?;
        if !parsed.success {
            anyhow::bail!("Directory reported failure for delegate listing");
        }
        Ok(DirectoryListing {
            delegates: parsed.delegates,
            total_count: parsed.total_count,
        })
    }

    async fn search_by_prefix(&self, query: &str) -> Result<Vec<Delegate>> {
        let url = format!(
            "{}/api/delegates/search?q={}&orderBy=username:asc",
            self.base_url, query
        );
        let body = self.get_text(&url).await?;
        let parsed: ListingResponse =
            sonic_rs::from_str(&body).context("Failed to parse delegate search result")?;
        if !parsed.success {
            anyhow::bail!("Directory reported failure for search '{}'", query);
        }
        Ok(parsed.delegates)
    }

    async fn fetch_ballot(&self, address: &str) -> Result<Option<Vec<String>>> {
        let url = format!(
            "{}/api/accounts/delegates/?address={}",
            self.base_url, address
        );
        let body = self.get_text(&url).await?;
        let parsed: BallotResponse =
            sonic_rs::from_str(&body).context("Failed to parse ballot response")?;
        if !parsed.success {
            // Unknown address, not a transport failure
            return Ok(None);
        }
        Ok(Some(
            parsed.delegates.into_iter().map(|dg| dg.username).collect(),
        ))
    }
}
