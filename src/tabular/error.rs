use thiserror::Error;

/// Errors that can occur below the request boundary of the tabular client
///
/// These never reach callers of [`ApiClient`](super::ApiClient) operations:
/// the request primitive logs them and folds them into an error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, DNS, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request or response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Header value could not be encoded (e.g. control characters in credentials)
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error (missing env vars, unknown protocol, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
