//! # fabula-channel
//!
//! The resilient push-notification channel: a WebSocket client that keeps a
//! connection to the backend alive, demultiplexes inbound messages to
//! subscribers, and recovers transparently from disconnection.
//!
//! Structure:
//!
//! - [`ChannelContext`]: immutable connection parameters (endpoint + optional
//!   project scope), reused verbatim on every reconnect
//! - [`SubscriptionRegistry`]: topic key → callbacks, queried per message
//! - [`dispatch::dispatch_frame`]: decodes one frame and routes it
//! - [`EventChannel`]: owns the transport lifecycle (connect, close,
//!   fixed-delay reconnect) and the explicit-disconnect suppression

#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod registry;

pub use channel::{ConnectionState, EventChannel};
pub use config::ChannelConfig;
pub use context::ChannelContext;
pub use errors::{ChannelError, Result};
pub use registry::{EventCallback, SubscriptionRegistry, TopicKey};
