//! Workspace endpoint handlers.

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

/// Query parameters for listing workspaces.
#[derive(Debug, Default, Deserialize)]
pub struct ListWorkspacesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /workspaces.json
pub async fn list_workspaces(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListWorkspacesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Some(rejection) = reject(&state, &headers, query.page.unwrap_or(1)) {
        return rejection;
    }

    let workspaces: Vec<_> = state.workspaces.iter().collect();
    Json(page_body("workspaces", &workspaces, query.page, query.per_page)).into_response()
}
