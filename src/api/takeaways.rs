//! Takeaway accessor and relation resolution.

use std::sync::Arc;

use super::{decode_row, decode_rows, encode_row};
use crate::error::RemoteError;
use crate::models::{
    NewTakeaway, Observation, Resource, Takeaway, TakeawayWithRelations, OBSERVATIONS_TABLE,
    RESOURCES_TABLE, TAKEAWAYS_TABLE,
};
use crate::postgrest::Query;
use crate::traits::RemoteStoreTrait;

/// Create, list and look up rows of `takeaways`, optionally with their
/// referenced observations and resources.
#[derive(Debug)]
pub struct TakeawaysApi<R> {
    store: Arc<R>,
}

impl<R> Clone for TakeawaysApi<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: RemoteStoreTrait> TakeawaysApi<R> {
    /// Create an accessor over a shared store handle.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Insert a takeaway and return it as stored.
    ///
    /// Referenced ids are stored as given; they are not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the store rejects the row.
    pub async fn create(&self, takeaway: &NewTakeaway) -> Result<Takeaway, RemoteError> {
        let row = self
            .store
            .insert(TAKEAWAYS_TABLE, encode_row(takeaway)?)
            .await?;
        let created: Takeaway = decode_row(TAKEAWAYS_TABLE, row)?;
        tracing::debug!(table = TAKEAWAYS_TABLE, id = %created.id, "Takeaway created");
        Ok(created)
    }

    /// All takeaways, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Takeaway>, RemoteError> {
        let rows = self
            .store
            .select(TAKEAWAYS_TABLE, Query::new().order_desc("created_at"))
            .await?;
        decode_rows(TAKEAWAYS_TABLE, rows)
    }

    /// The takeaway with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if no row (or more than one) matches.
    pub async fn get_by_id(&self, id: &str) -> Result<Takeaway, RemoteError> {
        let row = self
            .store
            .select_single(TAKEAWAYS_TABLE, Query::new().eq("id", id))
            .await?;
        decode_row(TAKEAWAYS_TABLE, row)
    }

    /// The takeaway with `id`, plus the observations and resources it references.
    ///
    /// Each kind of reference is resolved with one extra query, issued only
    /// when the takeaway has at least one id of that kind. Ids that no longer
    /// exist are left out of the result without error.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] from the first query that fails; later queries
    /// are not attempted.
    pub async fn get_with_relations(&self, id: &str) -> Result<TakeawayWithRelations, RemoteError> {
        let takeaway = self.get_by_id(id).await?;

        let observations = match takeaway.linked_observations() {
            Some(ids) => Some(self.fetch_observations(ids).await?),
            None => None,
        };

        let resources = match takeaway.linked_resources() {
            Some(ids) => Some(self.fetch_resources(ids).await?),
            None => None,
        };

        tracing::debug!(
            table = TAKEAWAYS_TABLE,
            id,
            observations = ?observations.as_ref().map(Vec::len),
            resources = ?resources.as_ref().map(Vec::len),
            "Takeaway relations resolved"
        );

        Ok(TakeawayWithRelations {
            takeaway,
            observations,
            resources,
        })
    }

    async fn fetch_observations(&self, ids: &[String]) -> Result<Vec<Observation>, RemoteError> {
        let query = Query::new().in_list("id", ids.iter().cloned());
        let rows = self.store.select(OBSERVATIONS_TABLE, query).await?;
        if rows.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                found = rows.len(),
                "Some referenced observations no longer exist"
            );
        }
        decode_rows(OBSERVATIONS_TABLE, rows)
    }

    async fn fetch_resources(&self, ids: &[String]) -> Result<Vec<Resource>, RemoteError> {
        let query = Query::new().in_list("id", ids.iter().cloned());
        let rows = self.store.select(RESOURCES_TABLE, query).await?;
        if rows.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                found = rows.len(),
                "Some referenced resources no longer exist"
            );
        }
        decode_rows(RESOURCES_TABLE, rows)
    }
}
