//! Raw follower normalization
//!
//! Stateless mapping from the provider's user object into the flat
//! [`FollowerRecord`] shape. Pure and idempotent: the same raw entry always
//! produces the same record.

use crate::fetcher::{FetcherError, FetcherResult};
use crate::{FollowerRecord, RawFollower};
use chrono::{DateTime, SecondsFormat, Utc};

/// Provider timestamp format, e.g. "Wed Aug 27 13:08:45 +0000 2008"
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Normalize a raw follower entry into a [`FollowerRecord`].
///
/// Absent source values map to explicit empties (empty string, `false`, `0`)
/// so all eleven fields are always populated. The account-creation timestamp
/// is coerced into an ISO-8601 UTC instant with millisecond precision.
///
/// # Errors
/// Returns [`FetcherError::MalformedTimestamp`] when `created_at` is absent
/// or does not parse. A single bad record fails the whole run.
pub fn normalize(raw: &RawFollower) -> FetcherResult<FollowerRecord> {
    let user = raw.screen_name.clone().unwrap_or_default();
    let created_at = coerce_created_at(raw.created_at.as_deref(), &user)?;

    Ok(FollowerRecord {
        id: raw.id_str.clone().unwrap_or_default(),
        name: raw.name.clone().unwrap_or_default(),
        user,
        followed: raw.following.unwrap_or(false),
        followers: raw.followers_count.unwrap_or(0),
        following: raw.friends_count.unwrap_or(0),
        listed: raw.listed_count.unwrap_or(0),
        favourites: raw.favourites_count.unwrap_or(0),
        statuses: raw.statuses_count.unwrap_or(0),
        created_at,
        profile_image: raw.profile_image_url_https.clone().unwrap_or_default(),
    })
}

/// Coerce the provider timestamp into ISO-8601 UTC ("2008-08-27T13:08:45.000Z")
fn coerce_created_at(raw: Option<&str>, user: &str) -> FetcherResult<String> {
    let raw = raw.unwrap_or_default();

    let parsed = DateTime::parse_from_str(raw, CREATED_AT_FORMAT).map_err(|_| {
        FetcherError::MalformedTimestamp {
            user: user.to_string(),
            raw: raw.to_string(),
        }
    })?;

    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}
