//! Workflow tests against a mock PostgREST server.
//!
//! Every test starts its own [`MockServer`] and points a
//! [`LearningSystemClient`] at it, so requests are checked on the wire.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod error_recovery;
mod relations;

use learning_system::postgrest::{ClientConfig, PostgrestClient};
use learning_system::LearningSystemClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const ANON_KEY: &str = "test-anon-key";
pub const CREATED_AT: &str = "2024-03-01T09:30:00+00:00";

/// Start a mock server and a client bound to it.
pub async fn start() -> (MockServer, LearningSystemClient) {
    let server = MockServer::start().await;
    let client = client_for(&server, ClientConfig::default().with_timeout_ms(5_000));
    (server, client)
}

/// Client for `server` with explicit transport options.
pub fn client_for(server: &MockServer, config: ClientConfig) -> LearningSystemClient {
    let store = PostgrestClient::new(server.uri(), ANON_KEY, config).expect("client");
    LearningSystemClient::with_store(store)
}

pub fn resource_json(id: &str, title: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "source_url": null,
        "content_text": null,
        "resource_type": "paper",
        "tags": tags,
        "added_at": CREATED_AT
    })
}

pub fn observation_json(id: &str, content: &str, experiment_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "content": content,
        "experiment_id": experiment_id,
        "context": null,
        "created_at": CREATED_AT
    })
}

pub fn takeaway_json(
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
        "created_at": CREATED_AT
    })
}

/// The 406 body PostgREST sends when a single-row read matches no rows.
pub fn no_rows_body() -> Value {
    json!({
        "code": "PGRST116",
        "details": "The result contains 0 rows",
        "hint": null,
        "message": "JSON object requested, multiple (or no) rows returned"
    })
}
