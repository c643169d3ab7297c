//! Error types for the learning system client.
//!
//! This module defines a small error hierarchy:
//! - [`AppError`]: Top-level application errors
//! - [`RemoteError`]: Failures reported by, or while talking to, the remote data service
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// PostgREST error code for "wrong number of rows for a single-object response".
pub const NOT_FOUND_CODE: &str = "PGRST116";

/// Top-level application error.
///
/// Returned by the demo binary and by helpers that both load configuration
/// and talk to the remote service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote data service error.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Remote data service errors.
///
/// This is the only error kind returned by the accessors. API failures carry
/// the store's payload unmodified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The service answered with a non-success status.
    #[error("{}", describe_api(*status, code.as_deref(), message))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Store error code (e.g. `PGRST116`, `23514`).
        code: Option<String>,
        /// Human-readable message from the store, or the raw body.
        message: String,
        /// Additional details from the store.
        details: Option<String>,
        /// Hint from the store.
        hint: Option<String>,
    },

    /// The request could not be sent or the connection failed.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// A row or payload did not match the expected record shape.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the mismatch.
        message: String,
    },
}

fn describe_api(status: u16, code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("Status {status} ({code}): {message}"),
        None => format!("Status {status}: {message}"),
    }
}

impl RemoteError {
    /// Returns true if a single-row fetch matched zero (or several) rows.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code: Some(code), .. } if code == NOT_FOUND_CODE)
    }

    /// HTTP status of an API error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Store error code of an API error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
