//! # Follower Export Library
//!
//! A library for exporting the complete follower list of a Twitter account
//! to CSV through the v1.1 `followers/list` endpoint.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Fully drains the cursor-based endpoint, 200 users per page
//! - **Rate-Limit Aware**: Waits out rate-limit rejections using the server's
//!   `x-rate-limit-reset` header, then resumes on the same cursor
//! - **Stable Record Shape**: Every raw user object is normalized into a flat
//!   eleven-field record; absent source fields become explicit empty values
//! - **CSV Output**: Fixed column order suitable for spreadsheets and downstream tools
//!
//! ## Quick Start
//!
//! ```no_run
//! use follower_export::config::Credentials;
//! use follower_export::fetcher::pagination::collect_followers;
//! use follower_export::fetcher::twitter_http::TwitterHttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::from_env()?;
//! let client = TwitterHttpClient::new(credentials);
//!
//! let records = collect_followers(&client, "jack").await?;
//! println!("fetched {} followers", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Credential and run configuration loaded from the environment
//! - [`fetcher`] - Paginated follower fetching with rate-limit retry
//! - [`output`] - CSV output writer
//! - [`cli`] - CLI command implementation

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};

/// CLI command implementations
pub mod cli;

/// Credential and run configuration
pub mod config;

/// Follower fetching, retry, pagination and normalization
pub mod fetcher;

/// Data output writers
pub mod output;

/// Raw follower object as returned by the provider.
///
/// Every field is optional at the wire level: the provider omits or nulls
/// fields freely, and deserialization must never fail because of that.
/// [`fetcher::normalizer::normalize`] maps absent values to explicit empties.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawFollower {
    /// Numeric user ID, string-encoded to avoid precision loss
    #[serde(default)]
    pub id_str: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Handle (screen name)
    #[serde(default)]
    pub screen_name: Option<String>,
    /// Whether the authenticated account follows this user
    #[serde(default)]
    pub following: Option<bool>,
    /// Follower count
    #[serde(default)]
    pub followers_count: Option<u64>,
    /// Following ("friends") count
    #[serde(default)]
    pub friends_count: Option<u64>,
    /// Count of public lists this user appears on
    #[serde(default)]
    pub listed_count: Option<u64>,
    /// Favourites (likes) count
    #[serde(default)]
    pub favourites_count: Option<u64>,
    /// Status (tweet) count
    #[serde(default)]
    pub statuses_count: Option<u64>,
    /// Account creation time in the provider's format,
    /// e.g. "Wed Aug 27 13:08:45 +0000 2008"
    #[serde(default)]
    pub created_at: Option<String>,
    /// HTTPS profile image URL
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

/// Normalized follower record with a stable, flat field set.
///
/// All eleven fields are always present. Where the source value was absent,
/// the field holds an explicit empty value (empty string, `false`, or `0`)
/// rather than being omitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FollowerRecord {
    /// Numeric user ID (string-encoded)
    pub id: String,
    /// Display name
    pub name: String,
    /// Handle (screen name)
    pub user: String,
    /// Whether the queried account follows this user
    pub followed: bool,
    /// Follower count
    pub followers: u64,
    /// Following count
    pub following: u64,
    /// Listed count
    pub listed: u64,
    /// Favourites count
    pub favourites: u64,
    /// Status count
    pub statuses: u64,
    /// Account creation time as an ISO-8601 UTC instant
    pub created_at: String,
    /// HTTPS profile image URL
    pub profile_image: String,
}
