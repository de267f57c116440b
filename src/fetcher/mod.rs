//! Follower fetching, retry scheduling, pagination and normalization

use crate::RawFollower;
use async_trait::async_trait;
use serde::Deserialize;

pub mod normalizer;
pub mod oauth;
pub mod pagination;
pub mod retry;
pub mod twitter_http;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// HTTP transport or protocol error (fatal, never retried)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response parse error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Provider error response other than a rate limit (fatal)
    #[error("API error {code}: {message}")]
    ApiError {
        /// Provider error code
        code: i64,
        /// Provider error message
        message: String,
    },

    /// Rate limit exceeded; carries the reset time from the
    /// `x-rate-limit-reset` response header
    #[error("rate limit exceeded, resets at epoch second {reset_epoch_seconds}")]
    RateLimitExceeded {
        /// Epoch seconds at which the provider lifts the limit
        reset_epoch_seconds: i64,
    },

    /// A follower record carried an account-creation timestamp that could
    /// not be coerced to ISO-8601 (fatal, no skip-and-continue)
    #[error("malformed created_at timestamp {raw:?} for user {user:?}")]
    MalformedTimestamp {
        /// Handle of the offending record, if present
        user: String,
        /// The raw timestamp value
        raw: String,
    },

    /// The provider returned a cursor that was already visited during
    /// this run, which would otherwise loop forever
    #[error("cursor cycle detected: cursor {cursor:?} returned twice")]
    CursorCycle {
        /// The repeated cursor value
        cursor: String,
    },
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// One page of the paginated followers endpoint: a batch of raw entries
/// plus the cursor for the subsequent request (`"0"` means no more pages).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FollowerPage {
    /// Raw follower entries in provider order
    pub users: Vec<RawFollower>,
    /// Cursor for the next page
    pub next_cursor_str: String,
}

/// Fetcher for one page of followers.
///
/// Implementations are stateless across calls; the trait seam exists so the
/// retry scheduler and pagination driver can be exercised with test doubles.
#[async_trait]
pub trait FollowerFetcher: Send + Sync {
    /// Fetch a single page of followers for `screen_name` at `cursor`.
    ///
    /// # Errors
    /// Returns [`FetcherError::RateLimitExceeded`] when the provider rejects
    /// the request with error code 88; any other failure is fatal for the run.
    async fn fetch_page(&self, screen_name: &str, cursor: &str) -> FetcherResult<FollowerPage>;
}
