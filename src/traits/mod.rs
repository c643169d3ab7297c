//! Trait definitions for mockable dependencies.
//!
//! This module defines [`RemoteStoreTrait`], the boundary between the typed
//! accessors and the remote data service. It is the capability set the
//! accessors rely on: insert-with-return, filtered and ordered select, and
//! exact-one-row select.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates `MockRemoteStoreTrait` for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;
use crate::postgrest::Query;

/// Remote tabular data service.
///
/// Rows travel as JSON objects; decoding into typed records is the
/// accessors' concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStoreTrait: Send + Sync {
    /// Insert one row and return it as stored (with server-assigned columns).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the service rejects the row or cannot be reached.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError>;

    /// Return every row matching `query`, in the query's order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails.
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, RemoteError>;

    /// Return the single row matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the query fails or does not match exactly
    /// one row (see [`RemoteError::is_not_found`]).
    async fn select_single(&self, table: &str, query: Query) -> Result<Value, RemoteError>;
}

#[async_trait]
impl<T: RemoteStoreTrait + ?Sized> RemoteStoreTrait for Arc<T> {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        (**self).insert(table, row).await
    }

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, RemoteError> {
        (**self).select(table, query).await
    }

    async fn select_single(&self, table: &str, query: Query) -> Result<Value, RemoteError> {
        (**self).select_single(table, query).await
    }
}
