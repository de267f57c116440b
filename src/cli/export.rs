//! Export command implementation

use crate::config::ExportConfig;
use crate::fetcher::pagination::collect_followers;
use crate::fetcher::twitter_http::TwitterHttpClient;
use crate::output::csv::CsvFollowersWriter;
use crate::output::{FollowersWriter, OutputWriter};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use super::CliError;

/// Export the complete follower list of a Twitter account to CSV
#[derive(Debug, Parser)]
#[command(name = "follower-export", version, about)]
pub struct Cli {
    /// Target account screen name (defaults to the SCREEN_NAME env var)
    #[arg(long)]
    pub screen_name: Option<String>,

    /// Output CSV path (defaults to the OUTPUT_PATH env var)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Run the export: drain all follower pages, then write the CSV.
    ///
    /// Records reach the output sink only after the whole fetch succeeds;
    /// a fatal error anywhere leaves no partial file content behind.
    ///
    /// # Errors
    /// Returns [`CliError`] on configuration, fetch or output failures.
    pub async fn execute(self) -> Result<(), CliError> {
        let config = ExportConfig::from_env(self.screen_name, self.output)?;

        info!("Fetching {} followers...", config.screen_name);

        let client = TwitterHttpClient::new(config.credentials.clone());
        let records = collect_followers(&client, &config.screen_name).await?;

        info!(
            "Writing {} records to CSV file {}",
            records.len(),
            config.output_path.display()
        );

        let mut writer = CsvFollowersWriter::new(&config.output_path)?;
        writer.write_records(&records)?;
        writer.close()?;

        info!("Done!");
        Ok(())
    }
}
