//! Unified entry point over the three accessors.
//!
//! [`LearningSystemClient`] builds one store handle and shares it between
//! [`ResourcesApi`], [`ObservationsApi`] and [`TakeawaysApi`].

use std::sync::Arc;

use crate::api::{ObservationsApi, ResourcesApi, TakeawaysApi};
use crate::config::{Config, SecretString};
use crate::error::RemoteError;
use crate::postgrest::{ClientConfig, PostgrestClient};
use crate::traits::RemoteStoreTrait;

/// Facade exposing every record kind through one value.
///
/// # Example
///
/// ```no_run
/// use learning_system::{LearningSystemClient, NewObservation};
///
/// # async fn demo() -> Result<(), learning_system::RemoteError> {
/// let client = LearningSystemClient::new("https://project.supabase.co", "anon-key")?;
/// let observation = client
///     .observations
///     .create(&NewObservation::new("Loss plateaued").with_experiment("exp-001"))
///     .await?;
/// println!("{}", observation.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LearningSystemClient<R = PostgrestClient> {
    /// `learning_resources` accessor.
    pub resources: ResourcesApi<R>,
    /// `observations` accessor.
    pub observations: ObservationsApi<R>,
    /// `takeaways` accessor.
    pub takeaways: TakeawaysApi<R>,
}

impl<R> Clone for LearningSystemClient<R> {
    fn clone(&self) -> Self {
        Self {
            resources: self.resources.clone(),
            observations: self.observations.clone(),
            takeaways: self.takeaways.clone(),
        }
    }
}

impl LearningSystemClient<PostgrestClient> {
    /// Connect to the service at `url` using `key` and default transport options.
    ///
    /// No request is made here; connectivity problems surface on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] if the HTTP stack cannot be initialised.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self, RemoteError> {
        let store = PostgrestClient::new(url, SecretString::new(key), ClientConfig::default())?;
        Ok(Self::with_store(store))
    }

    /// Connect using loaded configuration (URL, key, timeout and schema).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] if the HTTP stack cannot be initialised.
    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        let store = PostgrestClient::new(
            config.supabase_url.clone(),
            config.api_key.clone(),
            ClientConfig::from(config),
        )?;
        tracing::debug!(
            url = %config.supabase_url,
            timeout_ms = config.request_timeout_ms,
            schema = ?config.schema,
            "Learning system client created"
        );
        Ok(Self::with_store(store))
    }
}

impl<R: RemoteStoreTrait> LearningSystemClient<R> {
    /// Wire the accessors over an existing store.
    #[must_use]
    pub fn with_store(store: R) -> Self {
        let store = Arc::new(store);
        Self {
            resources: ResourcesApi::new(Arc::clone(&store)),
            observations: ObservationsApi::new(Arc::clone(&store)),
            takeaways: TakeawaysApi::new(store),
        }
    }
}
