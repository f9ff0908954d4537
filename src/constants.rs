//! Deployment constants: vote limits, batch capacity, networking defaults

/// Library name used in user agents
pub const LIB_NAME: &str = "votedesk";

/// Package version from Cargo.toml (set at compile time)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the user agent string for HTTP requests
pub fn user_agent() -> String {
    format!("{}/{}", LIB_NAME, VERSION)
}

// ============================================================================
// Voting Constants
// ============================================================================

/// Maximum number of delegates a single account may vote for.
///
/// Also used as the directory page size: every page fetch asks for exactly
/// this many delegates, so one page can hold a full ballot.
pub const MAX_ALLOWED_VOTES: usize = 101;

/// Maximum number of vote/unvote operations per submitted batch
pub const BATCH_CAPACITY: usize = 33;

/// Transaction fee charged per submitted batch (in LSK)
pub const VOTING_FEE_LSK: f64 = 1.0;

// ============================================================================
// Timeout Constants (in seconds)
// ============================================================================

/// Default HTTP request timeout for directory calls
pub const HTTP_TIMEOUT_SECS: u64 = 30;
