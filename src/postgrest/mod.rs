//! Connection to the remote data service.
//!
//! This module provides:
//! - [`PostgrestClient`]: the authenticated handle (connection factory)
//! - [`Query`]: filter and ordering description for reads
//! - [`ClientConfig`]: transport options
//!
//! # Example
//!
//! ```
//! use learning_system::postgrest::{connect, Query};
//!
//! // No network traffic happens until the first request.
//! let client = connect("https://project.supabase.co", "anon-key").unwrap();
//! assert_eq!(
//!     client.table_url("observations"),
//!     "https://project.supabase.co/rest/v1/observations"
//! );
//!
//! let query = Query::new().eq("experiment_id", "exp-001").order_desc("created_at");
//! assert_eq!(query.to_params().len(), 3);
//! ```

mod client;
mod config;
mod query;

pub use client::{error_from_body, PostgrestClient, SINGLE_OBJECT};
pub use config::{ClientConfig, REST_PATH};
pub use query::{Filter, Order, Query};

use crate::config::SecretString;
use crate::error::RemoteError;

/// Build a client for `url` and `key` with default transport options.
///
/// # Errors
///
/// Returns [`RemoteError::Network`] only if the HTTP stack cannot be initialised.
pub fn connect(
    url: impl Into<String>,
    key: impl Into<String>,
) -> Result<PostgrestClient, RemoteError> {
    PostgrestClient::new(url, SecretString::new(key), ClientConfig::default())
}
