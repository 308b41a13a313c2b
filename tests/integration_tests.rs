//! Integration tests using a mock HTTP server
//!
//! Exercises a reqwest-backed listing call end to end: flat iteration,
//! page-level iteration, fixed-size batching, and resume-token handling
//! against a wiremock JSON listing API.

use async_trait::async_trait;
use futures::StreamExt;
use pagewise::{list_all, AsyncListCall, Error, ListCall, Result};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// A reqwest-backed listing call
// ============================================================================

#[derive(Debug, Clone, Default)]
struct ListUsersRequest {
    page_token: Option<String>,
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
    users: Vec<User>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct User {
    id: u64,
    name: String,
}

struct ListUsers {
    client: reqwest::Client,
    base_url: String,
    start_token: Option<String>,
}

impl ListUsers {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            start_token: None,
        }
    }

    fn starting_at(mut self, token: impl Into<String>) -> Self {
        self.start_token = Some(token.into());
        self
    }
}

impl ListCall for ListUsers {
    type Request = ListUsersRequest;
    type Response = ListUsersResponse;
    type Item = User;

    fn initial_request(&self) -> ListUsersRequest {
        ListUsersRequest {
            page_token: self.start_token.clone(),
            page_size: None,
        }
    }

    fn write_token(&self, request: &mut ListUsersRequest, token: &str) {
        request.page_token = Some(token.to_owned());
    }

    fn write_size(&self, request: &mut ListUsersRequest, size: u32) {
        request.page_size = Some(size);
    }

    fn read_token(&self, response: &ListUsersResponse) -> Option<String> {
        response.next_page_token.clone()
    }

    fn read_items(&self, response: &ListUsersResponse) -> Vec<User> {
        response.users.clone()
    }
}

#[async_trait]
impl AsyncListCall for ListUsers {
    async fn issue(&self, request: ListUsersRequest) -> Result<ListUsersResponse> {
        let mut http = self.client.get(format!("{}/v1/users", self.base_url));
        if let Some(token) = &request.page_token {
            http = http.query(&[("page_token", token.as_str())]);
        }
        if let Some(size) = request.page_size {
            http = http.query(&[("page_size", size.to_string().as_str())]);
        }
        let response = http
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Error::transport)?;
        response.json().await.map_err(Error::transport)
    }
}

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_owned(),
    }
}

/// Route engine logs to the test output when RUST_LOG is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Flat and page-level iteration
// ============================================================================

#[tokio::test]
async fn test_flat_listing_over_http() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": 1, "name": "Alice"},
                {"id": 2, "name": "Bob"}
            ],
            "next_page_token": "t2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page_token", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 3, "name": "Carol"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users: Vec<User> = list_all(ListUsers::new(mock_server.uri()))
        .map(|item| item.expect("listing must not fail"))
        .collect()
        .await;

    assert_eq!(
        users,
        vec![user(1, "Alice"), user(2, "Bob"), user(3, "Carol")]
    );
}

#[tokio::test]
async fn test_page_listing_exposes_response_metadata() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 1, "name": "Alice"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pages: Vec<_> = list_all(ListUsers::new(mock_server.uri()))
        .into_pages()
        .map(|page| page.expect("listing must not fail"))
        .collect()
        .await;

    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_last());
    assert_eq!(pages[0].response().users.len(), 1);
    assert_eq!(pages[0].token(), None);
}

#[tokio::test]
async fn test_http_error_surfaces_as_transport_error() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut users = list_all(ListUsers::new(mock_server.uri()));

    let err = users
        .next()
        .await
        .expect("first pull")
        .expect_err("server error must surface");
    assert!(err.is_transport());

    // terminally failed: no retry, no second request
    assert!(users.next().await.is_none());
}

// ============================================================================
// Fixed-size batching
// ============================================================================

#[tokio::test]
async fn test_fixed_size_batching_over_http() {
    init_tracing();
    let mock_server = MockServer::start().await;

    // both mocks require the engine to have written page_size=2
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page_size", "2"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": 1, "name": "Alice"},
                {"id": 2, "name": "Bob"}
            ],
            "next_page_token": "t2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page_size", "2"))
        .and(query_param("page_token", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 3, "name": "Carol"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let batches: Vec<_> = list_all(ListUsers::new(mock_server.uri()))
        .into_pages()
        .with_fixed_size(2)
        .expect("positive batch size")
        .map(|batch| batch.expect("listing must not fail"))
        .collect()
        .await;

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].items(), &[user(1, "Alice"), user(2, "Bob")]);
    assert_eq!(batches[1].items(), &[user(3, "Carol")]);

    // second batch was built from the page requested with "t2"
    assert_eq!(batches[1].resume_token(), Some("t2"));
}

#[tokio::test]
async fn test_resuming_from_a_batch_token_redelivers_its_page() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page_token", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": 3, "name": "Carol"},
                {"id": 4, "name": "Dave"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // a fresh listing started from a batch's resume token re-fetches the
    // whole service page that batch ended in; the caller skips duplicates
    let resumed: Vec<User> = list_all(ListUsers::new(mock_server.uri()).starting_at("t2"))
        .map(|item| item.expect("listing must not fail"))
        .collect()
        .await;

    assert_eq!(resumed, vec![user(3, "Carol"), user(4, "Dave")]);
}
