//! Mavenlink API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource-level operations live on [`crate::MavenlinkApi`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{MavenlinkError, Result};
use crate::processor::is_blank;
use crate::traits::{Query, Transport};

const DEFAULT_API_URL: &str = "https://api.mavenlink.com/api/v1";
const USER_AGENT: &str = concat!("mavenlink/", env!("CARGO_PKG_VERSION"));

/// Low-level Mavenlink API client.
///
/// Handles authentication and HTTP requests. It implements [`Transport`]
/// and is the default transport of [`crate::MavenlinkApi`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use mavenlink::MavenlinkClient;
///
/// # fn example() -> mavenlink::Result<()> {
/// // Create from environment variables
/// let client = MavenlinkClient::from_env()?;
///
/// // Or configure manually
/// let client = MavenlinkClient::new("your-access-token")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MavenlinkClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for MavenlinkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MavenlinkClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MavenlinkClient {
    /// Create a client from environment variables.
    ///
    /// Uses `MAVENLINK_ACCESS_TOKEN` for authentication and optionally
    /// `MAVENLINK_API_URL` for the base URL (defaults to
    /// `https://api.mavenlink.com/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `MAVENLINK_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("MAVENLINK_ACCESS_TOKEN").map_err(|_| {
            MavenlinkError::ConfigMissing(
                "MAVENLINK_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("MAVENLINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::with_base_url(&token, &base_url)
    }

    /// Create a client for the public Mavenlink API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - OAuth access token, sent as `bearer <token>`
    /// * `base_url` - API root (e.g., `https://api.mavenlink.com/api/v1`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so joins keep the version segment
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(MavenlinkError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Turn a parsed body into the API's error, if it signals one.
    ///
    /// A non-blank `errors` field fails the request whatever the status; a
    /// failing status without one still fails.
    fn check_body(status: StatusCode, body: Value) -> Result<Value> {
        if let Some(errors) = body.get("errors").filter(|e| !is_blank(e)) {
            let message = error_message(errors);
            tracing::warn!(status = status.as_u16(), %message, "Mavenlink API returned errors");
            return Err(MavenlinkError::ApiError {
                message,
                errors: errors.clone(),
                status_code: Some(status.as_u16()),
            });
        }

        if !status.is_success() {
            return Err(MavenlinkError::ApiError {
                message: format!("HTTP {status}"),
                errors: Value::Null,
                status_code: Some(status.as_u16()),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Transport for MavenlinkClient {
    /// Make an authenticated GET request and parse the JSON body.
    #[tracing::instrument(skip(self))]
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value> {
        let url = self.base_url.join(endpoint)?;

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("bearer {}", self.token))
            .query(query)
            .send()
            .await
            .map_err(MavenlinkError::HttpError)?;

        let status = response.status();
        let text = response.text().await.map_err(MavenlinkError::HttpError)?;
        let body: Value = serde_json::from_str(&text)?;

        Self::check_body(status, body)
    }
}

/// Extract a readable message from an `errors` field.
///
/// Mavenlink sends `[{"type": ..., "message": ...}]`; anything else falls
/// back to the string itself or its JSON text.
fn error_message(errors: &Value) -> String {
    if let Some(message) = errors
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    match errors {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
