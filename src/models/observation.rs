//! Observation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::wire;

/// Insert payload for `observations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObservation {
    /// Note text (required).
    pub content: String,
    /// Opaque experiment identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_id: Option<String>,
    /// Arbitrary key-value context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl NewObservation {
    /// Create a payload with the required content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            experiment_id: None,
            context: None,
        }
    }

    /// Tie the observation to an experiment.
    #[must_use]
    pub fn with_experiment(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = Some(experiment_id.into());
        self
    }

    /// Attach a context object. Non-object values are wrapped as `{"value": ...}`.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(match context {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        });
        self
    }
}

/// A stored observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Server-assigned identifier (text or integer column).
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Note text.
    pub content: String,
    /// Opaque experiment identifier.
    #[serde(default)]
    pub experiment_id: Option<String>,
    /// Arbitrary key-value context.
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
    /// Server-assigned creation time.
    #[serde(deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Observation {
    /// Returns true if every non-server field equals the submitted payload.
    #[must_use]
    pub fn matches(&self, submitted: &NewObservation) -> bool {
        self.content == submitted.content
            && self.experiment_id == submitted.experiment_id
            && self.context == submitted.context
    }
}
