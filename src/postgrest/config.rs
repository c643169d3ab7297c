//! PostgREST client configuration.

#![allow(clippy::missing_const_for_fn)]

use crate::config::{Config, DEFAULT_REQUEST_TIMEOUT_MS};

/// Path prefix of the REST endpoint under the service URL.
pub const REST_PATH: &str = "rest/v1";

/// Transport options for [`PostgrestClient`](super::PostgrestClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Schema profile; `None` uses the service default.
    pub schema: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Target a non-default schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            schema: None,
        }
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout_ms: config.request_timeout_ms,
            schema: config.schema.clone(),
        }
    }
}
