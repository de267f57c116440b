//! Unit tests for the rate-limit retry scheduler

use async_trait::async_trait;
use follower_export::fetcher::retry::fetch_with_retry;
use follower_export::fetcher::{FetcherError, FetcherResult, FollowerFetcher, FollowerPage};
use std::sync::{Arc, Mutex};

/// Fetcher driven by a queue of scripted outcomes; records every cursor seen
struct SequenceFetcher {
    outcomes: Mutex<Vec<FetcherResult<FollowerPage>>>,
    cursors_seen: Arc<Mutex<Vec<String>>>,
}

impl SequenceFetcher {
    fn new(outcomes: Vec<FetcherResult<FollowerPage>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            cursors_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn cursors_seen(&self) -> Vec<String> {
        self.cursors_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FollowerFetcher for SequenceFetcher {
    async fn fetch_page(&self, _screen_name: &str, cursor: &str) -> FetcherResult<FollowerPage> {
        self.cursors_seen.lock().unwrap().push(cursor.to_string());
        let mut outcomes = self.outcomes.lock().unwrap();
        assert!(!outcomes.is_empty(), "fetcher called more often than scripted");
        outcomes.remove(0)
    }
}

fn empty_page(next_cursor: &str) -> FollowerPage {
    FollowerPage {
        users: Vec::new(),
        next_cursor_str: next_cursor.to_string(),
    }
}

/// A reset time in the past clamps the wait to zero, so these tests run
/// without real sleeping.
fn elapsed_rate_limit() -> FetcherError {
    FetcherError::RateLimitExceeded {
        reset_epoch_seconds: 0,
    }
}

#[tokio::test]
async fn success_returns_page_without_retry() {
    let fetcher = SequenceFetcher::new(vec![Ok(empty_page("next"))]);

    let page = fetch_with_retry(&fetcher, "jack", "-1").await.unwrap();

    assert_eq!(page.next_cursor_str, "next");
    assert_eq!(fetcher.cursors_seen(), vec!["-1"]);
}

#[tokio::test]
async fn two_rate_limits_then_success_preserves_cursor() {
    let fetcher = SequenceFetcher::new(vec![
        Err(elapsed_rate_limit()),
        Err(elapsed_rate_limit()),
        Ok(empty_page("xyz")),
    ]);

    let page = fetch_with_retry(&fetcher, "jack", "abc").await.unwrap();

    assert_eq!(page.next_cursor_str, "xyz");
    // Same cursor on every attempt: retry must not advance pagination
    assert_eq!(fetcher.cursors_seen(), vec!["abc", "abc", "abc"]);
}

#[tokio::test]
async fn non_rate_limit_error_propagates_immediately() {
    let fetcher = SequenceFetcher::new(vec![Err(FetcherError::ApiError {
        code: 34,
        message: "Sorry, that page does not exist".to_string(),
    })]);

    let err = fetch_with_retry(&fetcher, "jack", "-1").await.unwrap_err();

    assert!(matches!(err, FetcherError::ApiError { code: 34, .. }));
    assert_eq!(fetcher.cursors_seen(), vec!["-1"]);
}

#[tokio::test]
async fn transport_error_is_not_retried() {
    let fetcher = SequenceFetcher::new(vec![Err(FetcherError::HttpError(
        "connection reset by peer".to_string(),
    ))]);

    let err = fetch_with_retry(&fetcher, "jack", "-1").await.unwrap_err();

    assert!(matches!(err, FetcherError::HttpError(_)));
    assert_eq!(fetcher.cursors_seen(), vec!["-1"]);
}
