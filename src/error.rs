//! Error types for Mavenlink API operations.

use thiserror::Error;

/// Errors that can occur during Mavenlink API operations.
#[derive(Debug, Error)]
pub enum MavenlinkError {
    /// Configuration is missing or incomplete.
    #[error("Mavenlink configuration required: {0}")]
    ConfigMissing(String),

    /// The API answered with an `errors` payload or a failing status.
    #[error("Mavenlink API error: {message}")]
    ApiError {
        message: String,
        /// The raw `errors` field, or `Null` when the body carried none.
        errors: serde_json::Value,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The response parsed but does not have the shape the normalizer expects.
    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeError),
}

impl MavenlinkError {
    /// Returns true for failures at the transport boundary: the request
    /// never completed or its body could not be read as JSON.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::ParseError(_))
    }
}

/// Structural problems found while normalizing a raw response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The top-level document could not be read as a page response.
    #[error("malformed page response: {0}")]
    Malformed(String),

    /// An entity dictionary named by the caller is absent.
    #[error("response has no '{0}' collection")]
    MissingCollection(String),

    /// A referenced id has no entry in its dictionary.
    #[error("'{collection}' has no entry for id '{id}'")]
    MissingEntity { collection: String, id: String },

    /// A dictionary entry is not a JSON object.
    #[error("'{collection}' entry '{id}' is not an object")]
    NotAnObject { collection: String, id: String },

    /// An id is neither a string nor a number.
    #[error("invalid id in '{field}': {value}")]
    InvalidId { field: String, value: String },
}

/// Result type alias for Mavenlink operations.
pub type Result<T> = core::result::Result<T, MavenlinkError>;
