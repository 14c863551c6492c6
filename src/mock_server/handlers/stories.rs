//! Story endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{page_body, reject};
use crate::mock_server::state::MockState;

/// Query parameters for listing stories.
#[derive(Debug, Default, Deserialize)]
pub struct ListStoriesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(default)]
    pub parents_only: bool,
    /// Comma-separated associations to side-load.
    pub include: Option<String>,
}

/// GET /stories.json
pub async fn list_stories(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListStoriesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Some(rejection) = reject(&state, &headers, query.page.unwrap_or(1)) {
        return rejection;
    }

    let stories = state.list_stories(query.parents_only);
    let mut body = page_body("stories", &stories, query.page, query.per_page);

    let include_assignees = query
        .include
        .as_deref()
        .is_some_and(|inc| inc.split(',').any(|i| i.trim() == "assignees"));

    if include_assignees {
        let users: Map<String, Value> = body["stories"]
            .as_object()
            .into_iter()
            .flat_map(|page| page.values())
            .filter_map(|story| story.get("assignee_ids").and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
            .filter_map(|id| state.get_user(id).map(|u| (id.to_string(), u.clone())))
            .collect();
        body.insert("users".to_string(), Value::Object(users));
    }

    Json(body).into_response()
}
