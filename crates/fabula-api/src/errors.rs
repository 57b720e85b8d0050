//! API error types.

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (transport or non-success status).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a valid envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend returned a non-success envelope code.
    #[error("backend error ({code}): {message}")]
    Backend {
        /// Envelope `code` field.
        code: String,
        /// Envelope `msg` field, or `"Error"` when absent.
        message: String,
    },

    /// A success envelope arrived without the expected `data` payload.
    #[error("envelope has no data for {0}")]
    MissingData(String),

    /// The configured base URL is not an HTTP endpoint.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Convenience alias for API results.
pub type Result<T> = std::result::Result<T, ApiError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
