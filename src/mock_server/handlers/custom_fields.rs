//! Custom field value endpoint handlers.

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

/// Query parameters for listing custom field values.
#[derive(Debug, Default, Deserialize)]
pub struct ListCustomFieldValuesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub subject_type: Option<String>,
}

/// GET /custom_field_values.json
pub async fn list_custom_field_values(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListCustomFieldValuesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Some(rejection) = reject(&state, &headers, query.page.unwrap_or(1)) {
        return rejection;
    }

    let values = state.list_custom_field_values(query.subject_type.as_deref());
    Json(page_body("custom_field_values", &values, query.page, query.per_page)).into_response()
}
