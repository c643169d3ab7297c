//! Observation accessor.

use std::sync::Arc;

use super::{decode_row, decode_rows, encode_row};
use crate::error::RemoteError;
use crate::models::{NewObservation, Observation, OBSERVATIONS_TABLE};
use crate::postgrest::Query;
use crate::traits::RemoteStoreTrait;

/// Create and list rows of `observations`.
#[derive(Debug)]
pub struct ObservationsApi<R> {
    store: Arc<R>,
}

impl<R> Clone for ObservationsApi<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: RemoteStoreTrait> ObservationsApi<R> {
    /// Create an accessor over a shared store handle.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Insert an observation and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the store rejects the row.
    pub async fn create(&self, observation: &NewObservation) -> Result<Observation, RemoteError> {
        let row = self
            .store
            .insert(OBSERVATIONS_TABLE, encode_row(observation)?)
            .await?;
        let created: Observation = decode_row(OBSERVATIONS_TABLE, row)?;
        tracing::debug!(table = OBSERVATIONS_TABLE, id = %created.id, "Observation created");
        Ok(created)
    }

    /// All observations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Observation>, RemoteError> {
        let rows = self
            .store
            .select(OBSERVATIONS_TABLE, Query::new().order_desc("created_at"))
            .await?;
        decode_rows(OBSERVATIONS_TABLE, rows)
    }

    /// Observations recorded for `experiment_id`, newest first.
    ///
    /// The identifier is opaque; an unknown experiment simply yields no rows.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    pub async fn list_by_experiment(
        &self,
        experiment_id: &str,
    ) -> Result<Vec<Observation>, RemoteError> {
        let query = Query::new()
            .eq("experiment_id", experiment_id)
            .order_desc("created_at");
        let rows = self.store.select(OBSERVATIONS_TABLE, query).await?;
        tracing::debug!(
            table = OBSERVATIONS_TABLE,
            experiment_id,
            rows = rows.len(),
            "Observations listed for experiment"
        );
        decode_rows(OBSERVATIONS_TABLE, rows)
    }
}
