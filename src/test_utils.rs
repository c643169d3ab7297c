//! Test fixtures and factories.
//!
//! Builders for JSON rows shaped like the service's responses, plus the
//! canonical "wrong cardinality" error.
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{json, Value};

use crate::error::{RemoteError, NOT_FOUND_CODE};

/// Fixed server timestamp used by every fixture row.
pub const FIXTURE_TIMESTAMP: &str = "2024-01-15T12:00:00.000000+00:00";

/// A stored `learning_resources` row of type `paper`.
#[must_use]
pub fn resource_row(id: &str, title: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "source_url": null,
        "content_text": null,
        "resource_type": "paper",
        "tags": tags,
        "added_at": FIXTURE_TIMESTAMP
    })
}

/// A stored `observations` row without context.
#[must_use]
pub fn observation_row(id: &str, content: &str, experiment_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "content": content,
        "experiment_id": experiment_id,
        "context": null,
        "created_at": FIXTURE_TIMESTAMP
    })
}

/// A stored `takeaways` row; id lists are always present, possibly empty.
#[must_use]
pub fn takeaway_row(
    id: &str,
    insight: &str,
    observation_ids: &[&str],
    resource_ids: &[&str],
) -> Value {
    json!({
        "id": id,
        "insight": insight,
        "assumption_before": null,
        "assumption_after": null,
        "observation_ids": observation_ids,
        "resource_ids": resource_ids,
        "created_at": FIXTURE_TIMESTAMP
    })
}

/// The error PostgREST returns when a single-row read matches no rows.
#[must_use]
pub fn not_found_error() -> RemoteError {
    RemoteError::Api {
        status: 406,
        code: Some(NOT_FOUND_CODE.to_string()),
        message: "JSON object requested, multiple (or no) rows returned".to_string(),
        details: Some("The result contains 0 rows".to_string()),
        hint: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, Resource, Takeaway};

    #[test]
    fn test_fixture_rows_decode() {
        let resource: Resource = serde_json::from_value(resource_row("r1", "A", &["x"])).unwrap();
        assert_eq!(resource.tags, Some(vec!["x".to_string()]));

        let observation: Observation =
            serde_json::from_value(observation_row("o1", "B", None)).unwrap();
        assert!(observation.experiment_id.is_none());

        let takeaway: Takeaway =
            serde_json::from_value(takeaway_row("t1", "C", &[], &["r1"])).unwrap();
        assert_eq!(takeaway.observation_ids, Some(vec![]));
    }

    #[test]
    fn test_not_found_error_is_detected() {
        assert!(not_found_error().is_not_found());
    }
}
