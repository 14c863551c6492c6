//! Transport trait for single-page GET requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Query string pairs sent with a request. Ordering is not significant.
pub type Query = Vec<(&'static str, String)>;

/// Perform one authenticated GET against the Mavenlink API.
///
/// [`crate::MavenlinkClient`] is the HTTP implementation. Tests can supply
/// their own implementation to [`crate::MavenlinkApi::with_transport`].
///
/// # Example
///
/// ```ignore
/// use mavenlink::{MavenlinkClient, Transport};
///
/// let client = MavenlinkClient::new("token")?;
/// let body = client.get("workspaces.json", &vec![("page", "1".to_string())]).await?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `endpoint` with `query` and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails or the body is not
    /// JSON, and [`crate::MavenlinkError::ApiError`] when the body carries an
    /// `errors` field.
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value> {
        (**self).get(endpoint, query).await
    }
}
