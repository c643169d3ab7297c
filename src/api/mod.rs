//! Typed accessors, one per record kind.
//!
//! Each accessor holds a shared handle to the remote store and turns typed
//! calls into [`Query`](crate::postgrest::Query) values, forwarding them
//! unchanged. Accessors keep no other state and never cache.
//!
//! - [`ResourcesApi`]: `learning_resources`
//! - [`ObservationsApi`]: `observations`
//! - [`TakeawaysApi`]: `takeaways`, including relation resolution

mod observations;
mod resources;
mod takeaways;

pub use observations::ObservationsApi;
pub use resources::ResourcesApi;
pub use takeaways::TakeawaysApi;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::RemoteError;

/// Serialize an insert payload into a JSON row.
pub(crate) fn encode_row<T: Serialize>(payload: &T) -> Result<Value, RemoteError> {
    serde_json::to_value(payload).map_err(|e| RemoteError::Decode {
        message: format!("Failed to encode row: {e}"),
    })
}

/// Decode one JSON row into a typed record.
pub(crate) fn decode_row<T: DeserializeOwned>(table: &str, row: Value) -> Result<T, RemoteError> {
    serde_json::from_value(row).map_err(|e| RemoteError::Decode {
        message: format!("Unexpected row in {table}: {e}"),
    })
}

/// Decode a list of JSON rows, failing on the first mismatch.
pub(crate) fn decode_rows<T: DeserializeOwned>(
    table: &str,
    rows: Vec<Value>,
) -> Result<Vec<T>, RemoteError> {
    rows.into_iter().map(|row| decode_row(table, row)).collect()
}
