// src/delegate.rs
use serde::{Deserialize, Serialize};

/// Delegate
///
/// Represents a single votable entry from the delegate directory.
/// Identity is `username`; the remaining fields are display metadata
/// and play no role in selection tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delegate {
    pub username: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub productivity: f64,
    #[serde(default)]
    pub approval: f64,
}

impl Delegate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            rank: 0,
            productivity: 0.0,
            approval: 0.0,
        }
    }
}

/// One fixed-size page of the remote directory.
///
/// Pages are 1-indexed. `total_count` is only authoritative when it came
/// from page 1; later pages carry whatever the service reported but the
/// cache never reads it.
#[derive(Debug, Clone)]
pub struct DirectoryPage {
    pub index: u32,
    pub delegates: Vec<Delegate>,
    pub total_count: usize,
}

/// Wire response of a paged directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryListing {
    pub delegates: Vec<Delegate>,
    #[serde(rename = "totalCount", alias = "total_count", default)]
    pub total_count: usize,
}
