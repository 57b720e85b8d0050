//! # fabula-events
//!
//! The push-event vocabulary shared by the event channel and its callers:
//!
//! - [`EventKind`]: every event name the backend pushes over WebSocket
//! - [`InboundMessage`]: one decoded push frame, with comma-separated
//!   type-tag handling and scoping identifiers
//!
//! The string values match the backend wire format exactly.

#![deny(unsafe_code)]

pub mod kind;
pub mod message;

pub use kind::{ALL_EVENT_KINDS, EventKind};
pub use message::InboundMessage;
