//! Backend response envelope.
//!
//! Every endpoint wraps its payload in `{code, msg, data}`. `code == "0000"`
//! is success; anything else carries a user-facing `msg`. Pagination rides
//! inside `data` as `{records, total}` for paged endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Result};

/// The envelope code the backend uses for success.
pub const SUCCESS_CODE: &str = "0000";

/// Wire envelope around every response payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Outcome code; [`SUCCESS_CODE`] on success.
    pub code: String,
    /// Human-readable outcome description.
    #[serde(default)]
    pub msg: Option<String>,
    /// Payload, present on success for data-bearing endpoints.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope carries the success code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The `msg` field, or the backend's implicit `"Error"` fallback.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.msg {
            Some(msg) if !msg.is_empty() => msg.clone(),
            _ => "Error".to_string(),
        }
    }

    /// Unwrap the payload, converting a non-success code into
    /// [`ApiError::Backend`]. `endpoint` names the call for the
    /// missing-data case.
    pub fn into_result(self, endpoint: &str) -> Result<T> {
        if !self.is_success() {
            return Err(ApiError::Backend {
                message: self.message(),
                code: self.code,
            });
        }
        self.data
            .ok_or_else(|| ApiError::MissingData(endpoint.to_string()))
    }

    /// Check the code and discard the payload. For endpoints whose success
    /// response carries no data.
    pub fn into_ack(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Backend {
                message: self.message(),
                code: self.code,
            })
        }
    }
}

/// Decode a raw response body into an envelope.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<ApiEnvelope<T>> {
    Ok(serde_json::from_str(body)?)
}

/// Cursor for paged requests.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// One-based page number.
    pub current: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 20,
        }
    }
}

/// One page of results.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Rows on this page.
    pub records: Vec<T>,
    /// Total rows across all pages.
    pub total: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
