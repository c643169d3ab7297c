//! HTTP client for a PostgREST endpoint.
//!
//! This module provides:
//! - The authenticated connection handle ([`PostgrestClient`])
//! - Request construction for insert, select and single-row select
//! - Translation of error responses into [`RemoteError`]

#![allow(clippy::missing_errors_doc)]

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use super::config::{ClientConfig, REST_PATH};
use super::query::Query;
use crate::config::SecretString;
use crate::error::RemoteError;
use crate::traits::RemoteStoreTrait;

/// Media type asking PostgREST for exactly one object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

const JSON: &str = "application/json";

/// Authenticated handle to the remote data service.
///
/// Cheap to clone; clones share the underlying connection pool.
/// Construction does no I/O, so a bad URL or unreachable host is reported by
/// the first request.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    config: ClientConfig,
}

impl PostgrestClient {
    /// Create a new client for `base_url` authenticated with `api_key`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<SecretString>,
        config: ClientConfig,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RemoteError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            config,
        })
    }

    /// Get the service URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint of `table`, without query parameters.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.base_url.trim_end_matches('/'))
    }

    fn url_for(&self, table: &str, query: &Query) -> Result<Url, RemoteError> {
        Url::parse_with_params(&self.table_url(table), query.to_params()).map_err(|e| {
            RemoteError::Network {
                message: format!("Invalid service URL {}: {e}", self.base_url),
            }
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.api_key.expose())
            .header(AUTHORIZATION, self.api_key.bearer())
    }

    async fn read(&self, table: &str, query: Query, accept: &str) -> Result<Value, RemoteError> {
        let url = self.url_for(table, &query)?;
        let mut builder = self.authorized(self.client.get(url)).header(ACCEPT, accept);
        if let Some(schema) = &self.config.schema {
            builder = builder.header("Accept-Profile", schema);
        }
        let response = self.send("GET", table, builder).await?;
        Self::decode_body(response).await
    }

    /// Send a request and turn transport failures and error statuses into [`RemoteError`].
    async fn send(
        &self,
        method: &str,
        table: &str,
        builder: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let start = Instant::now();
        tracing::debug!(method, table, "Sending PostgREST request");

        let response = builder.send().await.map_err(|e| {
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if e.is_timeout() {
                tracing::error!(
                    method,
                    table,
                    elapsed_ms,
                    timeout_ms = self.config.timeout_ms,
                    "PostgREST request timed out"
                );
                RemoteError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                }
            } else {
                tracing::error!(method, table, elapsed_ms, error = %e, "PostgREST request failed");
                RemoteError::Network {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        tracing::debug!(
            method,
            table,
            status = %status,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "PostgREST response received"
        );

        if status.is_success() {
            return Ok(response);
        }

        let error = rejection(status.as_u16(), response.text().await);
        tracing::warn!(method, table, error = %error, "PostgREST request rejected");
        Err(error)
    }

    async fn decode_body(response: Response) -> Result<Value, RemoteError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| RemoteError::Decode {
                message: format!("Failed to parse response: {e}"),
            })
    }
}

#[async_trait]
impl RemoteStoreTrait for PostgrestClient {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        let url = self.url_for(table, &Query::new())?;
        let mut builder = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&row);
        if let Some(schema) = &self.config.schema {
            builder = builder.header("Content-Profile", schema);
        }
        let response = self.send("POST", table, builder).await?;
        Self::decode_body(response).await
    }

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, RemoteError> {
        match self.read(table, query, JSON).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(RemoteError::Decode {
                message: format!("Expected an array of rows, got {}", kind_of(&other)),
            }),
        }
    }

    async fn select_single(&self, table: &str, query: Query) -> Result<Value, RemoteError> {
        self.read(table, query, SINGLE_OBJECT).await
    }
}

/// Error payload returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<Value>,
    hint: Option<Value>,
}

/// Build a [`RemoteError::Api`] from a status and raw response body.
///
/// JSON error payloads are unpacked field by field; anything else is kept
/// verbatim as the message.
#[must_use]
pub fn error_from_body(status: u16, body: &str) -> RemoteError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(payload) if payload.code.is_some() || payload.message.is_some() => RemoteError::Api {
            status,
            code: payload.code,
            message: payload.message.unwrap_or_default(),
            details: payload.details.and_then(text_of),
            hint: payload.hint.and_then(text_of),
        },
        _ => RemoteError::Api {
            status,
            code: None,
            message: body.trim().to_string(),
            details: None,
            hint: None,
        },
    }
}

/// Error for a non-success response whose body may have failed to arrive.
fn rejection<E: fmt::Display>(status: u16, body: Result<String, E>) -> RemoteError {
    match body {
        Ok(body) => error_from_body(status, &body),
        Err(e) => RemoteError::Network {
            message: format!("Failed to read error body (status {status}): {e}"),
        },
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unused_async
)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_client(server: &MockServer) -> PostgrestClient {
        let config = ClientConfig::default().with_timeout_ms(5_000);
        PostgrestClient::new(server.uri(), "test-anon-key", config).unwrap()
    }

    #[test]
    fn test_client_new_does_not_validate_url() {
        let client = PostgrestClient::new("not a url", "k", ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), "not a url");
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client =
            PostgrestClient::new("https://abc.supabase.co/", "k", ClientConfig::default())
                .unwrap();
        assert_eq!(
            client.table_url("takeaways"),
            "https://abc.supabase.co/rest/v1/takeaways"
        );
        assert_eq!(client.config().timeout_ms, ClientConfig::default().timeout_ms);
    }

    #[tokio::test]
    async fn test_malformed_url_fails_on_first_use() {
        let client = PostgrestClient::new("not a url", "k", ClientConfig::default()).unwrap();
        let err = client
            .select("observations", Query::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Network { .. }));
    }

    #[tokio::test]
    async fn test_select_sends_auth_and_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/observations"))
            .and(header("apikey", "test-anon-key"))
            .and(header("authorization", "Bearer test-anon-key"))
            .and(query_param("select", "*"))
            .and(query_param("experiment_id", "eq.e1"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "o2", "content": "later"},
                {"id": "o1", "content": "earlier"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let rows = client
            .select(
                "observations",
                Query::new().eq("experiment_id", "e1").order_desc("created_at"),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "o2");
    }

    #[tokio::test]
    async fn test_select_contains_filter_is_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/learning_resources"))
            .and(query_param("tags", r#"cs.{"machine learning",x}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let rows = client
            .select(
                "learning_resources",
                Query::new().contains("tags", ["machine learning", "x"]),
            )
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_select_rejects_non_array_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.select("takeaways", Query::new()).await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { message } if message.contains("an object")));
    }

    #[tokio::test]
    async fn test_select_single_requests_object() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/takeaways"))
            .and(header("accept", SINGLE_OBJECT))
            .and(query_param("id", "eq.t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let row = client
            .select_single("takeaways", Query::new().eq("id", "t1"))
            .await
            .unwrap();
        assert_eq!(row["id"], "t1");
    }

    #[tokio::test]
    async fn test_select_single_wrong_cardinality() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client
            .select_single("learning_resources", Query::new().eq("id", "missing"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(406));
        match err {
            RemoteError::Api { details, hint, .. } => {
                assert_eq!(details.as_deref(), Some("The result contains 0 rows"));
                assert!(hint.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_requests_representation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/learning_resources"))
            .and(header("prefer", "return=representation"))
            .and(header("accept", SINGLE_OBJECT))
            .and(header("apikey", "test-anon-key"))
            .and(body_json(json!({"title": "A", "resource_type": "paper"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "r1",
                "title": "A",
                "resource_type": "paper",
                "added_at": "2024-01-15T12:00:00+00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let row = client
            .insert(
                "learning_resources",
                json!({"title": "A", "resource_type": "paper"}),
            )
            .await
            .unwrap();
        assert_eq!(row["id"], "r1");
    }

    #[tokio::test]
    async fn test_insert_constraint_violation_is_passed_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "23514",
                "details": null,
                "hint": null,
                "message": "new row for relation \"learning_resources\" violates check constraint"
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client
            .insert("learning_resources", json!({"title": "A"}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some("23514"));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("check constraint"));
    }

    #[tokio::test]
    async fn test_schema_profile_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("accept-profile", "learning"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("content-profile", "learning"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default().with_schema("learning");
        let client = PostgrestClient::new(server.uri(), "k", config).unwrap();
        client.select("observations", Query::new()).await.unwrap();
        client
            .insert("observations", json!({"content": "B"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(1_500)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::default().with_timeout_ms(100);
        let client = PostgrestClient::new(server.uri(), "k", config).unwrap();
        let err = client.select("observations", Query::new()).await.unwrap_err();
        assert_eq!(err, RemoteError::Timeout { timeout_ms: 100 });
    }

    #[test]
    fn test_error_from_plain_text_body() {
        let err = error_from_body(502, "  Bad Gateway\n");
        assert_eq!(
            err,
            RemoteError::Api {
                status: 502,
                code: None,
                message: "Bad Gateway".to_string(),
                details: None,
                hint: None,
            }
        );
    }

    #[test]
    fn test_error_from_json_body_with_structured_details() {
        let err = error_from_body(
            400,
            r#"{"code":"PGRST100","message":"bad filter","details":{"col":"tags"}}"#,
        );
        match err {
            RemoteError::Api { code, details, .. } => {
                assert_eq!(code.as_deref(), Some("PGRST100"));
                assert_eq!(details.as_deref(), Some(r#"{"col":"tags"}"#));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_error_body_is_a_network_error() {
        let err = rejection(500, Err::<String, _>("connection reset by peer"));
        match err {
            RemoteError::Network { message } => {
                assert!(message.contains("status 500"));
                assert!(message.contains("connection reset by peer"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_readable_error_body_is_an_api_error() {
        let err = rejection::<&str>(406, Ok(r#"{"code":"PGRST116","message":"no rows"}"#.into()));
        assert!(err.is_not_found());
    }
}
