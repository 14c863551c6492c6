//! Post endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{page_body, reject};
use crate::mock_server::state::MockState;

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(default)]
    pub parents_only: bool,
    pub workspace_id: Option<String>,
}

/// GET /posts.json
pub async fn list_posts(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListPostsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Some(rejection) = reject(&state, &headers, query.page.unwrap_or(1)) {
        return rejection;
    }

    let posts = state.list_posts(query.parents_only, query.workspace_id.as_deref());
    Json(page_body("posts", &posts, query.page, query.per_page)).into_response()
}
