//! Unit tests for the pagination driver

use async_trait::async_trait;
use follower_export::fetcher::pagination::collect_followers;
use follower_export::fetcher::{FetcherError, FetcherResult, FollowerFetcher, FollowerPage};
use follower_export::RawFollower;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted fetcher: serves a fixed page per cursor and records every call
struct ScriptedFetcher {
    pages: HashMap<String, FollowerPage>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    fn new(pages: Vec<(&str, FollowerPage)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(cursor, page)| (cursor.to_string(), page))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FollowerFetcher for ScriptedFetcher {
    async fn fetch_page(&self, _screen_name: &str, cursor: &str) -> FetcherResult<FollowerPage> {
        self.calls.lock().unwrap().push(cursor.to_string());
        self.pages
            .get(cursor)
            .cloned()
            .ok_or_else(|| FetcherError::HttpError(format!("no page scripted for {cursor}")))
    }
}

/// Create mock raw followers with sequential IDs starting at `start_id`
fn create_mock_followers(start_id: u64, count: usize) -> Vec<RawFollower> {
    (0..count)
        .map(|i| {
            let id = start_id + i as u64;
            RawFollower {
                id_str: Some(id.to_string()),
                name: Some(format!("User {id}")),
                screen_name: Some(format!("user{id}")),
                following: Some(false),
                followers_count: Some(10),
                friends_count: Some(20),
                listed_count: Some(0),
                favourites_count: Some(5),
                statuses_count: Some(100),
                created_at: Some("Wed Aug 27 13:08:45 +0000 2008".to_string()),
                profile_image_url_https: Some(format!("https://example.com/{id}.png")),
            }
        })
        .collect()
}

fn page(users: Vec<RawFollower>, next_cursor: &str) -> FollowerPage {
    FollowerPage {
        users,
        next_cursor_str: next_cursor.to_string(),
    }
}

#[tokio::test]
async fn two_page_chain_yields_sum_of_page_lengths() {
    let fetcher = ScriptedFetcher::new(vec![
        ("-1", page(create_mock_followers(0, 200), "abc")),
        ("abc", page(create_mock_followers(200, 53), "0")),
    ]);

    let records = collect_followers(&fetcher, "jack").await.unwrap();

    assert_eq!(records.len(), 253);
    assert_eq!(fetcher.calls(), vec!["-1", "abc"]);
}

#[tokio::test]
async fn records_preserve_page_then_in_page_order() {
    let fetcher = ScriptedFetcher::new(vec![
        ("-1", page(create_mock_followers(0, 3), "next")),
        ("next", page(create_mock_followers(3, 2), "0")),
    ]);

    let records = collect_followers(&fetcher, "jack").await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
}

#[tokio::test]
async fn single_terminal_page_needs_one_call() {
    let fetcher = ScriptedFetcher::new(vec![("-1", page(create_mock_followers(0, 7), "0"))]);

    let records = collect_followers(&fetcher, "jack").await.unwrap();

    assert_eq!(records.len(), 7);
    assert_eq!(fetcher.calls(), vec!["-1"]);
}

#[tokio::test]
async fn empty_terminal_page_yields_empty_result() {
    let fetcher = ScriptedFetcher::new(vec![("-1", page(Vec::new(), "0"))]);

    let records = collect_followers(&fetcher, "jack").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn malformed_timestamp_fails_whole_run() {
    let mut bad_page = create_mock_followers(200, 10);
    bad_page[4].created_at = Some("yesterday-ish".to_string());

    let fetcher = ScriptedFetcher::new(vec![
        ("-1", page(create_mock_followers(0, 200), "abc")),
        ("abc", page(bad_page, "0")),
    ]);

    let err = collect_followers(&fetcher, "jack").await.unwrap_err();

    assert!(matches!(err, FetcherError::MalformedTimestamp { .. }));
}

#[tokio::test]
async fn api_error_aborts_pagination() {
    // First page succeeds; second cursor is not scripted, so the fetcher fails
    let fetcher = ScriptedFetcher::new(vec![("-1", page(create_mock_followers(0, 5), "abc"))]);

    let err = collect_followers(&fetcher, "jack").await.unwrap_err();

    assert!(matches!(err, FetcherError::HttpError(_)));
    assert_eq!(fetcher.calls(), vec!["-1", "abc"]);
}

#[tokio::test]
async fn cursor_cycle_is_detected() {
    let fetcher = ScriptedFetcher::new(vec![
        ("-1", page(create_mock_followers(0, 2), "a")),
        ("a", page(create_mock_followers(2, 2), "b")),
        ("b", page(create_mock_followers(4, 2), "a")),
    ]);

    let err = collect_followers(&fetcher, "jack").await.unwrap_err();

    assert!(matches!(err, FetcherError::CursorCycle { ref cursor } if cursor == "a"));
    assert_eq!(fetcher.calls(), vec!["-1", "a", "b"]);
}
