//! Learning resource accessor.

use std::sync::Arc;

use super::{decode_row, decode_rows, encode_row};
use crate::error::RemoteError;
use crate::models::{NewResource, Resource, RESOURCES_TABLE};
use crate::postgrest::Query;
use crate::traits::RemoteStoreTrait;

/// Create, list and look up rows of `learning_resources`.
///
/// # Example
///
/// ```ignore
/// let resource = client
///     .resources
///     .create(&NewResource::new("A", ResourceType::Paper).with_tags(["x"]))
///     .await?;
/// let tagged = client.resources.list_by_tags(&["x"]).await?;
/// ```
#[derive(Debug)]
pub struct ResourcesApi<R> {
    store: Arc<R>,
}

impl<R> Clone for ResourcesApi<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: RemoteStoreTrait> ResourcesApi<R> {
    /// Create an accessor over a shared store handle.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Insert a resource and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the store rejects the row.
    pub async fn create(&self, resource: &NewResource) -> Result<Resource, RemoteError> {
        let row = self.store.insert(RESOURCES_TABLE, encode_row(resource)?).await?;
        let created: Resource = decode_row(RESOURCES_TABLE, row)?;
        tracing::debug!(table = RESOURCES_TABLE, id = %created.id, "Resource created");
        Ok(created)
    }

    /// All resources, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Resource>, RemoteError> {
        let rows = self
            .store
            .select(RESOURCES_TABLE, Query::new().order_desc("added_at"))
            .await?;
        decode_rows(RESOURCES_TABLE, rows)
    }

    /// Resources tagged with every one of `tags`.
    ///
    /// An empty `tags` slice returns every resource, including those whose
    /// `tags` column is null; no containment filter is sent in that case.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    pub async fn list_by_tags<S: AsRef<str>>(
        &self,
        tags: &[S],
    ) -> Result<Vec<Resource>, RemoteError> {
        // `NULL @> '{}'` is not true, so an empty containment filter would drop untagged rows.
        if tags.is_empty() {
            return self.list_all().await;
        }
        let query = Query::new().contains("tags", tags.iter().map(|t| t.as_ref()));
        let rows = self.store.select(RESOURCES_TABLE, query).await?;
        tracing::debug!(
            table = RESOURCES_TABLE,
            tags = tags.len(),
            rows = rows.len(),
            "Resources filtered by tags"
        );
        decode_rows(RESOURCES_TABLE, rows)
    }

    /// The resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if no row (or more than one) matches; see
    /// [`RemoteError::is_not_found`].
    pub async fn get_by_id(&self, id: &str) -> Result<Resource, RemoteError> {
        let row = self
            .store
            .select_single(RESOURCES_TABLE, Query::new().eq("id", id))
            .await?;
        decode_row(RESOURCES_TABLE, row)
    }
}
