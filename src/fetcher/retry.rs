//! Rate-limit-aware retry scheduling
//!
//! Wraps a [`FollowerFetcher`] call in a wait-and-resume loop. Only
//! rate-limit rejections are retried; every other failure is fatal for the
//! run. The retry count is unbounded on purpose: the provider's own reset
//! window eventually clears the limit, so a cutoff would only turn a slow
//! export into a failed one.

use crate::fetcher::{FetcherError, FetcherResult, FollowerFetcher, FollowerPage};
use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};

/// Safety margin added on top of the provider's reset time.
/// The reset header has whole-second granularity, so retrying exactly at the
/// advertised instant can still be rejected.
pub const RATE_LIMIT_SAFETY_MARGIN_MS: i64 = 2000;

/// Compute how long to wait before retrying after a rate-limit rejection.
///
/// `reset_epoch_seconds` is the provider's reset time; `now_ms` is the
/// current wall clock in epoch milliseconds. Clock skew or an already-elapsed
/// reset can make the raw difference negative, which clamps to zero
/// (retry immediately) rather than erroring.
pub fn reset_wait(reset_epoch_seconds: i64, now_ms: i64) -> Duration {
    let wait_ms = (reset_epoch_seconds * 1000 + RATE_LIMIT_SAFETY_MARGIN_MS - now_ms).max(0);
    Duration::from_millis(wait_ms as u64)
}

/// Fetch one page, waiting out rate limits.
///
/// On [`FetcherError::RateLimitExceeded`], sleeps until the provider's reset
/// time plus [`RATE_LIMIT_SAFETY_MARGIN_MS`] and re-issues the identical
/// `(screen_name, cursor)` request. The sleep is the single cooperative
/// suspension point of a run; no other work proceeds during the wait.
///
/// # Errors
/// Propagates any non-rate-limit error unchanged. Never returns
/// `RateLimitExceeded` to the caller.
pub async fn fetch_with_retry<F>(
    fetcher: &F,
    screen_name: &str,
    cursor: &str,
) -> FetcherResult<FollowerPage>
where
    F: FollowerFetcher + ?Sized,
{
    loop {
        match fetcher.fetch_page(screen_name, cursor).await {
            Ok(page) => return Ok(page),
            Err(FetcherError::RateLimitExceeded { reset_epoch_seconds }) => {
                let wait = reset_wait(reset_epoch_seconds, Utc::now().timestamp_millis());
                warn!(
                    "API rate limit reached, trying again in {:.2} minutes",
                    wait.as_secs_f64() / 60.0
                );
                tokio::time::sleep(wait).await;
                info!("Trying again for cursor {cursor}");
            }
            Err(e) => return Err(e),
        }
    }
}
