//! Twitter v1.1 HTTP client
//!
//! Implements [`FollowerFetcher`] over the `followers/list` endpoint with
//! OAuth 1.0a signing and rate-limit classification. One network call per
//! `fetch_page`; no state is carried across calls beyond the shared
//! connection pool.
//!
//! Transport failures are fatal by design: there is no transport-level retry,
//! only the rate-limit wait-and-resume handled by the retry scheduler.

use crate::config::Credentials;
use crate::fetcher::oauth::OauthSigner;
use crate::fetcher::{FetcherError, FetcherResult, FollowerFetcher, FollowerPage};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Production API base URL
const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Followers list endpoint path
const FOLLOWERS_ENDPOINT: &str = "/1.1/followers/list.json";

/// Users requested per page (the endpoint maximum)
pub const PAGE_SIZE: usize = 200;

/// Provider error code for "rate limit exceeded"
const RATE_LIMIT_ERROR_CODE: i64 = 88;

/// Response header carrying the epoch-seconds reset time
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Error payload shape for non-success responses:
/// `{"errors": [{"code": 88, "message": "..."}]}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    code: i64,
    #[serde(default)]
    message: String,
}

/// HTTP client for the followers endpoint.
pub struct TwitterHttpClient {
    client: Client,
    base_url: String,
    signer: OauthSigner,
}

impl TwitterHttpClient {
    /// Create a client against the production API.
    pub fn new(credentials: Credentials) -> Self {
        Self::new_with_base_url(credentials, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for testing).
    pub fn new_with_base_url(credentials: Credentials, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            signer: OauthSigner::new(credentials),
        }
    }
}

#[async_trait]
impl FollowerFetcher for TwitterHttpClient {
    async fn fetch_page(&self, screen_name: &str, cursor: &str) -> FetcherResult<FollowerPage> {
        let url = format!("{}{}", self.base_url, FOLLOWERS_ENDPOINT);
        let params = [
            ("screen_name", screen_name.to_string()),
            ("count", PAGE_SIZE.to_string()),
            ("include_user_entities", "false".to_string()),
            ("skip_status", "true".to_string()),
            ("cursor", cursor.to_string()),
        ];

        let authorization = self.signer.authorization_header("GET", &url, &params);

        debug!("GET {} screen_name={} cursor={}", url, screen_name, cursor);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| FetcherError::HttpError(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            return response.json::<FollowerPage>().await.map_err(|e| {
                FetcherError::ParseError(format!("failed to deserialize followers page: {e}"))
            });
        }

        // Keep headers before consuming the body; the reset header lives there
        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();

        Err(classify_error(status, &headers, &body))
    }
}

/// Classify a non-success response into the fetcher error taxonomy.
///
/// Error code 88 becomes [`FetcherError::RateLimitExceeded`] carrying the
/// reset time from the `x-rate-limit-reset` header, so the retry scheduler
/// can compute the wait without a second round trip. Every other code maps
/// to [`FetcherError::ApiError`] and is never retried.
fn classify_error(status: StatusCode, headers: &HeaderMap, body: &str) -> FetcherError {
    let envelope: ErrorEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) => {
            return FetcherError::HttpError(format!("HTTP {status}: {body}"));
        }
    };

    let Some(entry) = envelope.errors.first() else {
        return FetcherError::HttpError(format!("HTTP {status}: empty error list"));
    };

    if entry.code == RATE_LIMIT_ERROR_CODE {
        return match parse_reset_header(headers) {
            Some(reset_epoch_seconds) => FetcherError::RateLimitExceeded { reset_epoch_seconds },
            // Without the reset time there is nothing to schedule against
            None => FetcherError::HttpError(format!(
                "rate limited but {RATE_LIMIT_RESET_HEADER} header is missing or invalid"
            )),
        };
    }

    FetcherError::ApiError {
        code: entry.code,
        message: entry.message.clone(),
    }
}

/// Extract the epoch-seconds reset time from the response headers.
fn parse_reset_header(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
}
