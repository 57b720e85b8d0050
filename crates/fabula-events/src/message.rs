//! Inbound push frame decoding.
//!
//! [`InboundMessage`] is one decoded frame from the push channel. The `type`
//! field may carry a single symbolic name or a comma-separated list of names;
//! `projectId`/`chapterId` scope the message to an entity; everything else is
//! payload specific to the event kind. Messages are transient, constructed
//! per frame and discarded after dispatch.

use chrono::{DateTime, Utc};
use fabula_core::{ChapterId, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::EventKind;

/// One decoded push frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Raw type tag(s): a single name or a comma-separated list.
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Project this message is scoped to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Chapter this message is scoped to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    /// Toast headline (`error`/`success` frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Toast body (`error`/`success` frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remaining payload fields, event-kind specific.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// When this client decoded the frame.
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Decode a raw text frame.
    pub fn parse(frame: &str) -> serde_json::Result<Self> {
        serde_json::from_str(frame)
    }

    /// Type tags: the `type` field split on commas, whitespace trimmed,
    /// empty entries dropped.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.event_type
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Known event kinds among the type tags, in declaration order.
    /// Unknown tags are skipped.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.type_tags().filter_map(EventKind::parse).collect()
    }

    /// The message payload: every field except the routing ones
    /// (`type`, `projectId`, `chapterId`).
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut map = self.extra.clone();
        if let Some(title) = &self.title {
            let _ = map.insert("title".to_owned(), Value::String(title.clone()));
        }
        if let Some(message) = &self.message {
            let _ = map.insert("message".to_owned(), Value::String(message.clone()));
        }
        Value::Object(map)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
