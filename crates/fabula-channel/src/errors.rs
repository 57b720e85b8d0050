//! Channel error types.
//!
//! Only caller misuse is surfaced as an error. Transport failures are
//! recovered internally (log + timed reconnect) and never reach the caller.

use thiserror::Error;

/// Errors that can occur when constructing a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The endpoint URL is not a usable WebSocket base address.
    #[error("invalid channel endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
