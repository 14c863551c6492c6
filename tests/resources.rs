//! Resource accessor tests.
//!
//! Wiremock checks endpoint and query per accessor; an in-memory transport
//! checks pagination behavior and call counts.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mavenlink::{
    MavenlinkApi, MavenlinkClient, MavenlinkError, Projects, Query, ShapeError, Transport,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> MavenlinkApi {
    MavenlinkApi::with_transport(MavenlinkClient::with_base_url("test-token", &server.uri()).unwrap())
}

/// Build a page body for `collection` holding `records` in order.
fn page(collection: &str, count: u64, records: &[Value]) -> Value {
    let results: Vec<Value> = records
        .iter()
        .map(|r| json!({"key": collection, "id": r["id"]}))
        .collect();
    let index: serde_json::Map<String, Value> = records
        .iter()
        .map(|r| (r["id"].as_str().unwrap().to_string(), r.clone()))
        .collect();
    json!({"count": count, "results": results, collection: index})
}

// =============================================================================
// Endpoint and query binding
// =============================================================================

#[tokio::test]
async fn test_get_projects_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces.json"))
        .and(query_param("per_page", "200"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "workspaces",
            402,
            &[json!({"id": "7", "title": "Seven"}), json!({"id": "3", "title": "Three"})],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).get_projects(2).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.data[0]["title"], "Seven");
    assert_eq!(result.data[1]["title"], "Three");
    assert_eq!(result.meta.total_items, 402);
    assert_eq!(result.meta.total_pages, 201);
}

#[tokio::test]
async fn test_get_tasks_resolves_assignees() {
    let mock_server = MockServer::start().await;

    let mut body = page(
        "stories",
        1,
        &[json!({"id": "1", "title": "Design", "assignee_ids": ["u1", "u2"]})],
    );
    body["users"] = json!({"u1": {"id": "u1"}, "u2": {"id": "u2"}, "u3": {"id": "u3"}});

    Mock::given(method("GET"))
        .and(path("/stories.json"))
        .and(query_param("parents_only", "true"))
        .and(query_param("include", "assignees"))
        .and(query_param("per_page", "200"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tasks = api_for(&mock_server).get_tasks(1).await.unwrap();

    let task = &tasks.data[0];
    assert_eq!(task["assignees"], json!([{"id": "u1"}, {"id": "u2"}]));
    assert!(!task.contains_key("assignee_ids"));
}

#[tokio::test]
async fn test_get_projects_custom_fields_filters_workspaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/custom_field_values.json"))
        .and(query_param("subject_type", "Workspace"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "custom_field_values",
            1,
            &[json!({"id": "c1", "subject_id": "100", "display_value": "006xx"})],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fields = api_for(&mock_server)
        .get_all_projects_custom_fields()
        .await
        .unwrap();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["display_value"], "006xx");
}

#[tokio::test]
async fn test_get_comments_parents_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param("parents_only", "true"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "posts",
            1,
            &[json!({"id": "p1", "message": "Hello"})],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let comments = api_for(&mock_server).get_comments(1).await.unwrap();

    assert_eq!(comments.data[0]["message"], "Hello");
}

#[tokio::test]
async fn test_get_all_comments_for_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param("parents_only", "true"))
        .and(query_param("workspace_id", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "posts",
            3,
            &[json!({"id": "p1"}), json!({"id": "p2"})],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param("workspace_id", "100"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "posts",
            3,
            &[json!({"id": "p3"})],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let comments = api_for(&mock_server)
        .get_all_comments_for_project("100")
        .await
        .unwrap();

    let ids: Vec<&str> = comments.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_failing_page_fails_get_all() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            "workspaces",
            2,
            &[json!({"id": "1"})],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/workspaces.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"type": "system", "message": "Internal error"}]
        })))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).get_all_projects().await.unwrap_err();

    assert!(matches!(err, MavenlinkError::ApiError { ref message, .. } if message == "Internal error"));
}

#[tokio::test]
async fn test_missing_collection_is_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"key": "workspaces", "id": "1"}]
        })))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).get_projects(1).await.unwrap_err();

    assert!(matches!(err, MavenlinkError::Shape(ShapeError::MissingCollection(_))));
}

// =============================================================================
// Pagination with an in-memory transport
// =============================================================================

/// Serves pre-built pages keyed by `(endpoint, page)` and records requests.
#[derive(Default)]
struct FakeTransport {
    pages: HashMap<(String, String), Value>,
    requests: Mutex<Vec<(String, Query)>>,
}

impl FakeTransport {
    fn with_page(mut self, endpoint: &str, page: u32, body: Value) -> Self {
        self.pages
            .insert((endpoint.to_string(), page.to_string()), body);
        self
    }

    fn requests(&self) -> Vec<(String, Query)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, endpoint: &str, query: &Query) -> mavenlink::Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), query.clone()));

        let page = query
            .iter()
            .find(|(k, _)| *k == "page")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        self.pages
            .get(&(endpoint.to_string(), page.clone()))
            .cloned()
            .ok_or_else(|| MavenlinkError::ApiError {
                message: format!("no page {page}"),
                errors: Value::Null,
                status_code: Some(404),
            })
    }
}

fn workspaces(ids: &[&str], count: u64) -> Value {
    let records: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
    page("workspaces", count, &records)
}

#[tokio::test]
async fn test_single_page_is_fetched_once() {
    let transport = Arc::new(FakeTransport::default().with_page(
        "workspaces.json",
        1,
        workspaces(&["a", "b"], 2),
    ));
    let api = MavenlinkApi::with_transport(transport.clone());

    let projects = api.get_all_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_every_page_is_fetched_once_in_order() {
    let transport = Arc::new(
        FakeTransport::default()
            .with_page("workspaces.json", 1, workspaces(&["a", "b"], 5))
            .with_page("workspaces.json", 2, workspaces(&["c", "d"], 5))
            .with_page("workspaces.json", 3, workspaces(&["e"], 5)),
    );
    let api = MavenlinkApi::with_transport(transport.clone());

    let projects = api.get_all_projects().await.unwrap();

    let ids: Vec<&str> = projects.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);

    let mut pages: Vec<String> = transport
        .requests()
        .into_iter()
        .map(|(_, q)| q.into_iter().find(|(k, _)| *k == "page").unwrap().1)
        .collect();
    pages.sort();
    assert_eq!(pages, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_bounded_concurrency_returns_same_items() {
    let transport = FakeTransport::default()
        .with_page("workspaces.json", 1, workspaces(&["a"], 3))
        .with_page("workspaces.json", 2, workspaces(&["b"], 3))
        .with_page("workspaces.json", 3, workspaces(&["c"], 3));
    let api = MavenlinkApi::with_transport(transport)
        .with_max_concurrency(NonZeroUsize::new(1).unwrap());

    let projects = api.all::<Projects>(&()).await.unwrap();

    let ids: Vec<&str> = projects.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(api.transport().requests().len(), 3);
}

#[tokio::test]
async fn test_missing_later_page_fails() {
    let transport = FakeTransport::default()
        .with_page("workspaces.json", 1, workspaces(&["a"], 3))
        .with_page("workspaces.json", 2, workspaces(&["b"], 3));
    let api = MavenlinkApi::with_transport(transport);

    let err = api.get_all_projects().await.unwrap_err();

    assert!(matches!(err, MavenlinkError::ApiError { status_code: Some(404), .. }));
}

#[tokio::test]
async fn test_accessor_queries() {
    let empty = json!({"count": 0, "results": []});
    let transport = Arc::new(
        FakeTransport::default()
            .with_page("stories.json", 1, empty.clone())
            .with_page("custom_field_values.json", 1, empty.clone())
            .with_page("posts.json", 1, empty),
    );
    let api = MavenlinkApi::with_transport(transport.clone());

    api.get_all_tasks().await.unwrap();
    api.get_all_projects_custom_fields().await.unwrap();
    api.get_all_comments().await.unwrap();
    api.get_all_comments_for_project("42").await.unwrap();

    let requests = transport.requests();
    let as_map = |q: &Query| -> HashMap<&'static str, String> { q.iter().cloned().collect() };

    assert_eq!(requests[0].0, "stories.json");
    let tasks = as_map(&requests[0].1);
    assert_eq!(tasks["parents_only"], "true");
    assert_eq!(tasks["include"], "assignees");
    assert_eq!(tasks["per_page"], "200");

    assert_eq!(requests[1].0, "custom_field_values.json");
    assert_eq!(as_map(&requests[1].1)["subject_type"], "Workspace");

    assert_eq!(requests[2].0, "posts.json");
    let comments = as_map(&requests[2].1);
    assert_eq!(comments["parents_only"], "true");
    assert!(!comments.contains_key("workspace_id"));

    assert_eq!(requests[3].0, "posts.json");
    assert_eq!(as_map(&requests[3].1)["workspace_id"], "42");
}
