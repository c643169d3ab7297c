//! Takeaway records.

#![allow(clippy::missing_const_for_fn)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{wire, Observation, Resource};

/// Insert payload for `takeaways`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTakeaway {
    /// The insight (required).
    pub insight: String,
    /// What was believed before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumption_before: Option<String>,
    /// What is believed now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumption_after: Option<String>,
    /// Supporting observations, by id. Not checked for existence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_ids: Option<Vec<String>>,
    /// Supporting resources, by id. Not checked for existence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ids: Option<Vec<String>>,
}

impl NewTakeaway {
    /// Create a payload with the required insight.
    #[must_use]
    pub fn new(insight: impl Into<String>) -> Self {
        Self {
            insight: insight.into(),
            assumption_before: None,
            assumption_after: None,
            observation_ids: None,
            resource_ids: None,
        }
    }

    /// Record the assumption shift behind the insight.
    #[must_use]
    pub fn with_assumptions(
        mut self,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        self.assumption_before = Some(before.into());
        self.assumption_after = Some(after.into());
        self
    }

    /// Reference observations by id.
    #[must_use]
    pub fn with_observations<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observation_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Reference resources by id.
    #[must_use]
    pub fn with_resources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// A stored takeaway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Takeaway {
    /// Server-assigned identifier (text or integer column).
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// The insight.
    pub insight: String,
    /// What was believed before.
    #[serde(default)]
    pub assumption_before: Option<String>,
    /// What is believed now.
    #[serde(default)]
    pub assumption_after: Option<String>,
    /// Supporting observations, by id.
    #[serde(default, deserialize_with = "wire::id_list")]
    pub observation_ids: Option<Vec<String>>,
    /// Supporting resources, by id.
    #[serde(default, deserialize_with = "wire::id_list")]
    pub resource_ids: Option<Vec<String>>,
    /// Server-assigned creation time.
    #[serde(deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Takeaway {
    /// Referenced observation ids, or `None` when there are none to resolve.
    #[must_use]
    pub fn linked_observations(&self) -> Option<&[String]> {
        non_empty(self.observation_ids.as_deref())
    }

    /// Referenced resource ids, or `None` when there are none to resolve.
    #[must_use]
    pub fn linked_resources(&self) -> Option<&[String]> {
        non_empty(self.resource_ids.as_deref())
    }

    /// Returns true if every non-server field equals the submitted payload.
    #[must_use]
    pub fn matches(&self, submitted: &NewTakeaway) -> bool {
        self.insight == submitted.insight
            && self.assumption_before == submitted.assumption_before
            && self.assumption_after == submitted.assumption_after
            && self.observation_ids == submitted.observation_ids
            && self.resource_ids == submitted.resource_ids
    }
}

fn non_empty(ids: Option<&[String]>) -> Option<&[String]> {
    ids.filter(|ids| !ids.is_empty())
}

/// A takeaway with its references resolved.
///
/// `observations` / `resources` are `None` when the takeaway has no ids of
/// that kind; otherwise they hold whichever referenced rows still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeawayWithRelations {
    /// The takeaway itself.
    #[serde(flatten)]
    pub takeaway: Takeaway,
    /// Resolved observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<Vec<Observation>>,
    /// Resolved resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
}

impl TakeawayWithRelations {
    /// Number of attached observations (0 when none were fetched).
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.as_ref().map_or(0, Vec::len)
    }

    /// Number of attached resources (0 when none were fetched).
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.as_ref().map_or(0, Vec::len)
    }
}
