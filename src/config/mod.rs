//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//! - Secure access key storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use learning_system::config::{Config, SecretString, DEFAULT_REQUEST_TIMEOUT_MS};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     supabase_url: "https://project.supabase.co".to_string(),
//!     api_key: SecretString::new("anon-key-example"),
//!     schema: None,
//!     log_level: "info".to_string(),
//!     request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
//! };
//!
//! // The access key is protected from accidental logging
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("anon-key-example"));
//! ```

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use crate::error::ConfigError;

/// Environment variable holding the service URL.
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the access key.
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Fallback environment variable for the access key.
pub const KEY_FALLBACK_VAR: &str = "SUPABASE_KEY";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// The `api_key` field uses [`SecretString`] to prevent accidental logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service URL (e.g. `https://<project>.supabase.co`).
    pub supabase_url: String,
    /// Access key (protected from logging via [`SecretString`]).
    pub api_key: SecretString,
    /// Optional schema profile; the service default is used when `None`.
    pub schema: Option<String>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Transport timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Service URL
    /// - `SUPABASE_ANON_KEY`: Access key (`SUPABASE_KEY` is accepted as a fallback)
    ///
    /// Optional environment variables (with defaults):
    /// - `SUPABASE_SCHEMA`: Schema profile (default: service default)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: Transport timeout (default: `30000`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `SUPABASE_URL` or the access key is missing
    /// - `REQUEST_TIMEOUT_MS` is not a valid positive integer
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let supabase_url = std::env::var(URL_VAR).map_err(|_| ConfigError::MissingRequired {
            var: URL_VAR.into(),
        })?;

        let api_key = std::env::var(KEY_VAR)
            .or_else(|_| std::env::var(KEY_FALLBACK_VAR))
            .map_err(|_| ConfigError::MissingRequired {
                var: KEY_VAR.into(),
            })?;

        let schema = std::env::var("SUPABASE_SCHEMA")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let request_timeout_ms = parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

        let config = Self {
            supabase_url,
            api_key: SecretString::new(api_key),
            schema,
            log_level,
            request_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
