//! Cursor-based pagination driver
//!
//! Drains the paginated followers endpoint by walking the cursor chain from
//! `"-1"` (first page) to `"0"` (end of list), normalizing and accumulating
//! every entry along the way. Pagination is strictly sequential because each
//! page's cursor depends on the previous response.
//!
//! Entries are appended in API page order then in-page order. No
//! deduplication is performed: if the follower list mutates during a
//! long-running fetch, overlapping users across pages propagate to the
//! output as-is.

use crate::fetcher::retry::fetch_with_retry;
use crate::fetcher::{normalizer, FetcherError, FetcherResult, FollowerFetcher};
use crate::FollowerRecord;
use std::collections::HashSet;
use tracing::info;

/// Cursor value requesting the first page
pub const FIRST_CURSOR: &str = "-1";

/// Cursor value signalling the end of the list
pub const END_CURSOR: &str = "0";

/// Collect every follower of `screen_name` across all pages.
///
/// Rate-limit rejections are waited out by the retry scheduler and never
/// surface here. A repeated cursor (which would otherwise loop forever)
/// fails the run with [`FetcherError::CursorCycle`].
///
/// # Errors
/// Any non-rate-limit fetch error, a malformed record timestamp, or a cursor
/// cycle aborts the run; no partial result is returned.
pub async fn collect_followers<F>(
    fetcher: &F,
    screen_name: &str,
) -> FetcherResult<Vec<FollowerRecord>>
where
    F: FollowerFetcher + ?Sized,
{
    let mut records = Vec::new();
    let mut seen_cursors = HashSet::new();
    let mut cursor = FIRST_CURSOR.to_string();

    while cursor != END_CURSOR {
        if !seen_cursors.insert(cursor.clone()) {
            return Err(FetcherError::CursorCycle { cursor });
        }

        let page = fetch_with_retry(fetcher, screen_name, &cursor).await?;

        info!(
            "Fetched {} followers for cursor {}...",
            page.users.len(),
            cursor
        );

        for raw in &page.users {
            records.push(normalizer::normalize(raw)?);
        }

        cursor = page.next_cursor_str;
    }

    info!("Finished fetching followers: {} total", records.len());

    Ok(records)
}
