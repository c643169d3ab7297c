//! Configuration validation.
//!
//! Presence checks and range checks only; the service URL is not parsed here,
//! so a malformed URL surfaces on the first request.

use super::{Config, KEY_VAR, URL_VAR};
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `SUPABASE_URL` is empty
/// - `SUPABASE_ANON_KEY` is empty
/// - `REQUEST_TIMEOUT_MS` is not between 1000 and 300000
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.supabase_url.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: URL_VAR.into(),
            reason: "must not be empty".into(),
        });
    }

    if config.api_key.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: KEY_VAR.into(),
            reason: "must not be empty".into(),
        });
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    Ok(())
}
