//! Run configuration loaded from the process environment
//!
//! Credentials and run parameters come from environment variables (a `.env`
//! file is honored via dotenvy in the binary). The configuration is an
//! explicit struct handed to the fetcher at construction rather than an
//! ambient singleton, so tests can substitute their own values.

use std::path::PathBuf;

/// Environment variable names
const CONSUMER_KEY: &str = "CONSUMER_KEY";
const CONSUMER_SECRET: &str = "CONSUMER_SECRET";
const ACCESS_TOKEN_KEY: &str = "ACCESS_TOKEN_KEY";
const ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
const SCREEN_NAME: &str = "SCREEN_NAME";
const OUTPUT_PATH: &str = "OUTPUT_PATH";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The four credentials for OAuth 1.0a API authentication.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Application consumer key
    pub consumer_key: String,
    /// Application consumer secret
    pub consumer_secret: String,
    /// User access token
    pub access_token: String,
    /// User access token secret
    pub access_token_secret: String,
}

impl Credentials {
    /// Load credentials from `CONSUMER_KEY`, `CONSUMER_SECRET`,
    /// `ACCESS_TOKEN_KEY` and `ACCESS_TOKEN_SECRET`.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] naming the first absent variable.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            consumer_key: require_var(CONSUMER_KEY)?,
            consumer_secret: require_var(CONSUMER_SECRET)?,
            access_token: require_var(ACCESS_TOKEN_KEY)?,
            access_token_secret: require_var(ACCESS_TOKEN_SECRET)?,
        })
    }
}

/// Full configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// API credentials
    pub credentials: Credentials,
    /// Target account screen name
    pub screen_name: String,
    /// Output CSV path
    pub output_path: PathBuf,
}

impl ExportConfig {
    /// Load a run configuration from the environment, with optional overrides
    /// for the target account (`SCREEN_NAME`) and output path (`OUTPUT_PATH`).
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] when a credential, or a
    /// non-overridden run parameter, is absent.
    pub fn from_env(
        screen_name: Option<String>,
        output_path: Option<PathBuf>,
    ) -> ConfigResult<Self> {
        let screen_name = match screen_name {
            Some(name) => name,
            None => require_var(SCREEN_NAME)?,
        };
        let output_path = match output_path {
            Some(path) => path,
            None => PathBuf::from(require_var(OUTPUT_PATH)?),
        };

        Ok(Self {
            credentials: Credentials::from_env()?,
            screen_name,
            output_path,
        })
    }
}

/// Read an environment variable, treating absent and empty alike.
fn require_var(name: &'static str) -> ConfigResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
