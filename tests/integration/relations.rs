//! Relation resolution edge cases: empty, absent and stale reference lists.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::{resource_json, start, takeaway_json};

#[tokio::test]
async fn test_empty_observation_ids_skip_that_fetch() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(takeaway_json("tk-1", "C", &[], &["r1"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .and(query_param("id", "in.(r1)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([resource_json("r1", "A", &[])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let full = client.takeaways.get_with_relations("tk-1").await.unwrap();

    assert!(full.observations.is_none());
    assert_eq!(full.resources.unwrap()[0].id, "r1");
}

#[tokio::test]
async fn test_absent_id_lists_issue_no_fan_out() {
    let (server, client) = start().await;

    let mut row = takeaway_json("tk-1", "C", &[], &[]);
    row["observation_ids"] = json!(null);
    row["resource_ids"] = json!(null);

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(row))
        .expect(1)
        .mount(&server)
        .await;

    let full = client.takeaways.get_with_relations("tk-1").await.unwrap();

    assert!(full.observations.is_none());
    assert!(full.resources.is_none());
    // Only the takeaway itself was requested.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_resource_is_silently_dropped() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(takeaway_json("tk-1", "C", &[], &["r1", "gone"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .and(query_param("id", "in.(r1,gone)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([resource_json("r1", "A", &[])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let full = client.takeaways.get_with_relations("tk-1").await.unwrap();
    let resources = full.resources.unwrap();

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].id, "r1");
}

#[tokio::test]
async fn test_relations_serialize_flat() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(takeaway_json("tk-1", "C", &[], &["r1"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/learning_resources"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([resource_json("r1", "A", &[])])),
        )
        .mount(&server)
        .await;

    let full = client.takeaways.get_with_relations("tk-1").await.unwrap();
    let value = serde_json::to_value(&full).unwrap();

    assert_eq!(value["insight"], "C");
    assert_eq!(value["resources"][0]["title"], "A");
    assert!(value.get("observations").is_none());
}

#[tokio::test]
async fn test_bigint_ids_and_naive_timestamps_resolve() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/takeaways"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "insight": "C",
            "observation_ids": [41, 42],
            "resource_ids": [],
            "created_at": "2024-03-01T09:30:00.123456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/observations"))
        .and(query_param("id", "in.(41,42)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 41,
            "content": "B",
            "created_at": "2024-03-01 09:00:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let full = client.takeaways.get_with_relations("7").await.unwrap();

    assert_eq!(full.takeaway.id, "7");
    assert_eq!(full.observations.unwrap()[0].id, "41");
    assert!(full.resources.is_none());
}
