//! HTTP request handlers for the mock server.

pub mod custom_fields;
pub mod posts;
pub mod stories;
pub mod workspaces;

pub use custom_fields::*;
pub use posts::*;
pub use stories::*;
pub use workspaces::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::mock_server::state::{id_of, MockState};

/// Page size when the request sends none.
const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size the API honors.
const MAX_PER_PAGE: u32 = 200;

/// Reject the request if the token is wrong or the page is set to fail.
pub(crate) fn reject(state: &MockState, headers: &HeaderMap, page: u32) -> Option<Response> {
    if let Some(token) = &state.required_token {
        let expected = format!("bearer {token}");
        let given = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if given != Some(expected.as_str()) {
            return Some(error_response(
                StatusCode::UNAUTHORIZED,
                "oauth",
                "Invalid OAuth 2 Access Token",
            ));
        }
    }

    if state.failing_pages.contains(&page) {
        return Some(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "system",
            &format!("Page {page} is unavailable"),
        ));
    }

    None
}

/// Mavenlink's error envelope.
pub(crate) fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "errors": [{"type": kind, "message": message}]
        })),
    )
        .into_response()
}

/// Build the response for one page of `records`.
///
/// The body carries `count`, the page's `results` pointers, a dictionary
/// named `collection` with the page's records and a `meta` block.
pub(crate) fn page_body(
    collection: &str,
    records: &[&Value],
    page: Option<u32>,
    per_page: Option<u32>,
) -> Map<String, Value> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let total = records.len();

    // Apply pagination
    let start = (page as usize - 1) * per_page as usize;
    let slice: &[&Value] = if start < total {
        &records[start..(start + per_page as usize).min(total)]
    } else {
        &[]
    };

    let results: Vec<Value> = slice
        .iter()
        .filter_map(|r| id_of(r))
        .map(|id| json!({"key": collection, "id": id}))
        .collect();
    let index: Map<String, Value> = slice
        .iter()
        .filter_map(|r| id_of(r).map(|id| (id.to_string(), (*r).clone())))
        .collect();

    let mut body = Map::new();
    body.insert("count".to_string(), json!(total));
    body.insert("results".to_string(), Value::Array(results));
    body.insert(collection.to_string(), Value::Object(index));
    body.insert(
        "meta".to_string(),
        json!({
            "count": total,
            "page_count": total.div_ceil(per_page as usize),
            "page_number": page,
            "page_size": per_page,
        }),
    );
    body
}
