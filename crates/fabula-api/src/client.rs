//! Shared HTTP client.
//!
//! [`ApiClient`] owns one `reqwest::Client`, the backend base URL, and the
//! shared [`Notifier`]. Every endpoint call goes through [`ApiClient::post`]
//! or [`ApiClient::post_ack`], which decode the response envelope and turn
//! any failure (transport, non-success status, undecodable body, non-"0000"
//! code) into a user-visible notification before returning the error.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use fabula_core::{Notification, Notifier};

use crate::envelope::{self, ApiEnvelope};
use crate::errors::{ApiError, Result};

/// Typed client for the backend REST surface.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base` (`http://` or `https://`, no trailing
    /// slash required). Failed calls are surfaced through `notifier`.
    pub fn new(base: impl Into<String>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: validate_base(base.into())?,
            notifier,
        })
    }

    /// The base URL this client targets.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// POST `body` to `path` and unwrap the envelope's data payload.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.post_envelope(path, body).await?;
        envelope
            .into_result(path)
            .map_err(|e| self.fail(path, e))
    }

    /// POST `body` to `path`, checking the envelope code and discarding any
    /// data. For mutation endpoints whose success response is empty.
    pub async fn post_ack<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let envelope: ApiEnvelope<serde_json::Value> = self.post_envelope(path, body).await?;
        envelope.into_ack().map_err(|e| self.fail(path, e))
    }

    async fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "api request");

        let response = self
            .http
            .post(&url)
            .header("Cache-Control", "no-store,no-cache,must-revalidate")
            .json(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.fail(path, ApiError::Http(e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| self.fail(path, ApiError::Http(e)))?;
        envelope::decode(&text).map_err(|e| self.fail(path, e))
    }

    /// Log the failure and push it to the notifier, then hand the error
    /// back for propagation.
    fn fail(&self, path: &str, err: ApiError) -> ApiError {
        warn!(path = %path, error = %err, "api request failed");
        let message = match &err {
            ApiError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.notifier
            .notify(Notification::error("Request failed", message));
        err
    }
}

fn validate_base(base: String) -> Result<String> {
    let trimmed = base.trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ApiError::InvalidBaseUrl(base.clone()))?;
    if rest.is_empty() {
        return Err(ApiError::InvalidBaseUrl(base));
    }
    Ok(trimmed.to_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::MemoryNotifier;

    fn client(base: &str) -> Result<ApiClient> {
        ApiClient::new(base, Arc::new(MemoryNotifier::new()))
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        let client = client("http://127.0.0.1:8080/").unwrap();
        assert_eq!(client.base(), "http://127.0.0.1:8080");
        assert_eq!(client.url("/api/pinyin/getPinyinData"), "http://127.0.0.1:8080/api/pinyin/getPinyinData");
    }

    #[test]
    fn https_base_accepted() {
        assert!(client("https://fabula.example.com").is_ok());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = client("ws://127.0.0.1:8080").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn rejects_empty_host() {
        assert!(client("http://").is_err());
        assert!(client("").is_err());
    }

    #[test]
    fn fail_notifies_backend_message() {
        let notifier = Arc::new(MemoryNotifier::new());
        let client = ApiClient::new("http://127.0.0.1:1", notifier.clone()).unwrap();

        let err = client.fail(
            "/api/x",
            ApiError::Backend {
                code: "5001".to_string(),
                message: "no such project".to_string(),
            },
        );
        assert!(matches!(err, ApiError::Backend { .. }));

        let delivered = notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Request failed");
        assert_eq!(delivered[0].message, "no such project");
    }
}
