//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON wire
//! format, and `#[serde(default)]` so a partial settings file only overrides
//! the fields it names. Each type implements [`Default`] with production
//! default values.

use serde::{Deserialize, Serialize};

/// Root settings, loaded from `~/.fabula/settings.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FabulaSettings {
    /// Backend endpoints.
    pub server: ServerSettings,
    /// Push channel behavior.
    pub channel: ChannelSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Backend endpoint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Base URL of the REST API.
    pub api_base: String,
    /// Base URL of the WebSocket push endpoint.
    pub ws_base: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8080".to_string(),
            ws_base: "ws://127.0.0.1:8080".to_string(),
        }
    }
}

/// Push channel settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelSettings {
    /// Delay between a transport close and the next connection attempt.
    pub reconnect_delay_ms: u64,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: 5000,
        }
    }
}

/// Log output settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter directive, overridable via `FABULA_LOG_LEVEL`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
