//! Channel configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay before reconnecting after an unplanned close, in milliseconds.
///
/// Constant across attempts: the backend expects clients to come back at a
/// steady cadence rather than with exponential backoff.
fn default_reconnect_delay_ms() -> u64 {
    5000
}

/// Tunable channel behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    /// Fixed reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl ChannelConfig {
    /// The reconnect delay as a [`Duration`].
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
