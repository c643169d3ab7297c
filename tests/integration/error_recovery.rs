//! Error propagation tests.
//!
//! Every failure reaches the caller unchanged; nothing is retried.

use std::time::Duration;

use learning_system::postgrest::ClientConfig;
use learning_system::{NewResource, RemoteError, ResourceType};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::{client_for, no_rows_body, observation_json, start, takeaway_json};

#[tokio::test]
async fn test_get_by_id_missing_row_is_an_error() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .respond_with(ResponseTemplate::new(406).set_body_json(no_rows_body()))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.resources.get_by_id("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(406));
}

#[tokio::test]
async fn test_get_by_id_multiple_rows_is_an_error() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .and(query_param("id", "eq.dup"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "details": "The result contains 2 rows",
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.takeaways.get_by_id("dup").await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        RemoteError::Api { details, .. } => {
            assert_eq!(details.as_deref(), Some("The result contains 2 rows"));
        }
        other => unreachable!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_takeaway_aborts_before_fan_out() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(ResponseTemplate::new(406).set_body_json(no_rows_body()))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .takeaways
        .get_with_relations("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_observation_fan_out_failure_skips_resources() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(takeaway_json("tk-1", "C", &["o1"], &["r1"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/observations"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "XX000",
            "message": "internal error",
            "details": null,
            "hint": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.takeaways.get_with_relations("tk-1").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.code(), Some("XX000"));
}

#[tokio::test]
async fn test_resource_fan_out_failure_is_returned_unchanged() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(takeaway_json("tk-1", "C", &["o1"], &["r1"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/observations"))
        .and(query_param("id", "in.(o1)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([observation_json("o1", "B", Some("e1"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .and(query_param("id", "in.(r1)"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table learning_resources",
            "details": null,
            "hint": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.takeaways.get_with_relations("tk-1").await.unwrap_err();

    assert_eq!(
        err,
        RemoteError::Api {
            status: 401,
            code: Some("42501".to_string()),
            message: "permission denied for table learning_resources".to_string(),
            details: None,
            hint: None,
        }
    );
}

#[tokio::test]
async fn test_rejected_insert_keeps_service_payload() {
    let (server, client) = start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/learning_resources"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "23514",
            "message": "new row violates check constraint \"learning_resources_resource_type_check\"",
            "details": "Failing row contains (...)",
            "hint": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .resources
        .create(&NewResource::new("A", ResourceType::Other))
        .await
        .unwrap_err();

    match err {
        RemoteError::Api {
            status,
            code,
            details,
            hint,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("23514"));
            assert_eq!(details.as_deref(), Some("Failing row contains (...)"));
            assert!(hint.is_none());
        }
        other => unreachable!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_row_shape_is_a_decode_error() {
    let (server, client) = start().await;

    let mut row = observation_json("o1", "B", None);
    row["created_at"] = json!("yesterday");

    Mock::given(method("GET"))
        .and(path("/rest/v1/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&server)
        .await;

    let err = client.observations.list_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode { .. }));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = wiremock::MockServer::start().await;
    let client = client_for(&server, ClientConfig::default().with_timeout_ms(200));

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.observations.list_all().await.unwrap_err();
    assert_eq!(err, RemoteError::Timeout { timeout_ms: 200 });
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_error() {
    let client = learning_system::LearningSystemClient::new("http://127.0.0.1:9", "key").unwrap();

    let err = client.takeaways.list_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::Network { .. }));
}
