//! CSV output writer implementation

use crate::FollowerRecord;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

use super::{FollowersWriter, OutputError, OutputResult, OutputWriter};

const DEFAULT_BUFFER_SIZE: usize = 8192; // 8KB buffer

/// Flush interval in records
const FLUSH_INTERVAL: u64 = 1_000;

/// CSV row with the fixed, uppercase column order:
/// ID, NAME, USER, FOLLOWED, FOLLOWERS, FOLLOWING, LISTED, FAVOURITES,
/// STATUSES, CREATED_AT, PROFILE_IMAGE
#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct FollowerRow<'a> {
    id: &'a str,
    name: &'a str,
    user: &'a str,
    followed: bool,
    followers: u64,
    following: u64,
    listed: u64,
    favourites: u64,
    statuses: u64,
    created_at: &'a str,
    profile_image: &'a str,
}

impl<'a> From<&'a FollowerRecord> for FollowerRow<'a> {
    fn from(record: &'a FollowerRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            user: &record.user,
            followed: record.followed,
            followers: record.followers,
            following: record.following,
            listed: record.listed,
            favourites: record.favourites,
            statuses: record.statuses,
            created_at: &record.created_at,
            profile_image: &record.profile_image,
        }
    }
}

/// CSV writer for follower records
pub struct CsvFollowersWriter {
    writer: Writer<BufWriter<File>>,
    records_written: u64,
}

impl CsvFollowersWriter {
    /// Create a new CSV followers writer
    ///
    /// # Arguments
    /// * `path` - Output file path; parent directories are created as needed
    pub fn new<P: AsRef<Path>>(path: P) -> OutputResult<Self> {
        let path = path.as_ref();
        info!("Creating CSV writer: path={}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    OutputError::IoError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let file = File::create(path)
            .map_err(|e| OutputError::IoError(format!("Failed to create file: {}", e)))?;

        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let csv_writer = Writer::from_writer(buf_writer);

        // Headers are written by csv::Writer on the first serialize()
        debug!("CSV writer created (headers will be written on first serialize)");

        Ok(Self {
            writer: csv_writer,
            records_written: 0,
        })
    }

    /// Get number of records written so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

impl FollowersWriter for CsvFollowersWriter {
    fn write_record(&mut self, record: &FollowerRecord) -> OutputResult<()> {
        let row = FollowerRow::from(record);

        self.writer
            .serialize(&row)
            .map_err(|e| OutputError::CsvError(format!("Failed to write record: {}", e)))?;

        self.records_written += 1;

        if self.records_written % FLUSH_INTERVAL == 0 {
            self.flush()?;
            debug!("Progress: {} records written", self.records_written);
        }

        Ok(())
    }
}

impl OutputWriter for CsvFollowersWriter {
    fn flush(&mut self) -> OutputResult<()> {
        self.writer
            .flush()
            .map_err(|e| OutputError::FlushError(format!("Failed to flush: {}", e)))
    }

    fn close(mut self) -> OutputResult<()> {
        debug!(
            "Closing CSV writer: {} total records written",
            self.records_written
        );

        self.flush()?;

        let buf_writer = self
            .writer
            .into_inner()
            .map_err(|e| OutputError::IoError(format!("Failed to get inner writer: {}", e)))?;

        let file = buf_writer
            .into_inner()
            .map_err(|e| OutputError::IoError(format!("Failed to get file handle: {}", e)))?;

        file.sync_all()
            .map_err(|e| OutputError::IoError(format!("Failed to sync file: {}", e)))?;

        info!(
            "CSV writer closed successfully: {} records written",
            self.records_written
        );
        Ok(())
    }
}
