//! Per-frame decode and routing.
//!
//! One inbound frame can fan out along three independent paths:
//!
//! 1. each known event kind among its type tags → subscribers under
//!    [`TopicKey::Event`], invoked with the full decoded frame
//! 2. its `projectId`/`chapterId` scope → subscribers under
//!    [`TopicKey::Project`]/[`TopicKey::Chapter`], invoked with the payload
//!    (routing fields stripped)
//! 3. `error`/`success` tags → the [`Notifier`], once per matching tag
//!
//! A frame matching nothing is dropped without complaint. A frame that does
//! not decode is dropped too; decode failures are local and never affect
//! connection state.

use fabula_core::{Notification, Notifier};
use fabula_events::InboundMessage;
use serde_json::Value;
use tracing::{debug, trace};

use crate::registry::{SubscriptionRegistry, TopicKey};

/// Decode one raw text frame and invoke every matching subscriber.
///
/// Callbacks run synchronously on the caller, in registration order per key.
pub fn dispatch_frame(registry: &SubscriptionRegistry, notifier: &dyn Notifier, frame: &str) {
    let envelope: Value = match serde_json::from_str(frame) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "dropping undecodable frame");
            return;
        }
    };
    let message: InboundMessage = match serde_json::from_value(envelope.clone()) {
        Ok(m) => m,
        Err(e) => {
            debug!(error = %e, "dropping non-object frame");
            return;
        }
    };

    let kinds = message.kinds();
    trace!(tags = %message.event_type, kind_count = kinds.len(), "dispatching frame");

    for kind in kinds {
        if let Some(level) = kind.toast_level() {
            notifier.notify(Notification {
                level,
                title: message.title.clone().unwrap_or_default(),
                message: message.message.clone().unwrap_or_default(),
            });
        }
        for callback in registry.lookup(&TopicKey::Event(kind)) {
            callback(&envelope);
        }
    }

    let payload = message.payload();
    if let Some(project_id) = &message.project_id {
        for callback in registry.lookup(&TopicKey::Project(project_id.clone())) {
            callback(&payload);
        }
    }
    if let Some(chapter_id) = &message.chapter_id {
        for callback in registry.lookup(&TopicKey::Chapter(chapter_id.clone())) {
            callback(&payload);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
