//! Event kinds pushed by the backend.
//!
//! [`EventKind`] enumerates every symbolic event name the backend sends over
//! the push channel. Each variant serializes to the underscore-separated
//! string the backend uses on the wire.

use fabula_core::NotificationLevel;
use serde::{Deserialize, Serialize};

/// Symbolic event names pushed over the WebSocket channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    // ── Audio generation ─────────────────────────────────────────────
    /// A sentence finished synthesizing (per-sentence progress).
    #[serde(rename = "audio_generate_result")]
    AudioGenerateResult,
    /// A chapter's generation task finished or changed state.
    #[serde(rename = "audio_generate_summary")]
    AudioGenerateSummary,
    /// Chapter audio files were merged into one output.
    #[serde(rename = "audio_combine")]
    AudioCombine,

    // ── Chapter state ────────────────────────────────────────────────
    /// The chapter's parsed content changed; reload it.
    #[serde(rename = "chapter_reload")]
    ChapterReload,
    /// A chapter title changed.
    #[serde(rename = "chapter_title_refresh")]
    ChapterTitleRefresh,
    /// Chapter sentence metadata changed.
    #[serde(rename = "chapter_info_refresh")]
    ChapterInfoRefresh,
    /// The chapter's role assignments changed.
    #[serde(rename = "chapter_role_refresh")]
    ChapterRoleRefresh,

    // ── Toasts ───────────────────────────────────────────────────────
    /// User-visible error toast, carries `title` and `message`.
    #[serde(rename = "error")]
    Error,
    /// User-visible success toast, carries `title` and `message`.
    #[serde(rename = "success")]
    Success,
}

/// All event kind variants, for exhaustive testing.
pub const ALL_EVENT_KINDS: &[EventKind] = &[
    EventKind::AudioGenerateResult,
    EventKind::AudioGenerateSummary,
    EventKind::AudioCombine,
    EventKind::ChapterReload,
    EventKind::ChapterTitleRefresh,
    EventKind::ChapterInfoRefresh,
    EventKind::ChapterRoleRefresh,
    EventKind::Error,
    EventKind::Success,
];

impl EventKind {
    /// Wire name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AudioGenerateResult => "audio_generate_result",
            Self::AudioGenerateSummary => "audio_generate_summary",
            Self::AudioCombine => "audio_combine",
            Self::ChapterReload => "chapter_reload",
            Self::ChapterTitleRefresh => "chapter_title_refresh",
            Self::ChapterInfoRefresh => "chapter_info_refresh",
            Self::ChapterRoleRefresh => "chapter_role_refresh",
            Self::Error => "error",
            Self::Success => "success",
        }
    }

    /// Parse a wire name; `None` for names this client does not know.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "audio_generate_result" => Some(Self::AudioGenerateResult),
            "audio_generate_summary" => Some(Self::AudioGenerateSummary),
            "audio_combine" => Some(Self::AudioCombine),
            "chapter_reload" => Some(Self::ChapterReload),
            "chapter_title_refresh" => Some(Self::ChapterTitleRefresh),
            "chapter_info_refresh" => Some(Self::ChapterInfoRefresh),
            "chapter_role_refresh" => Some(Self::ChapterRoleRefresh),
            "error" => Some(Self::Error),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    /// Toast severity for the `error`/`success` pair; `None` otherwise.
    #[must_use]
    pub fn toast_level(self) -> Option<NotificationLevel> {
        match self {
            Self::Error => Some(NotificationLevel::Error),
            Self::Success => Some(NotificationLevel::Success),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_count() {
        assert_eq!(ALL_EVENT_KINDS.len(), 9);
    }

    #[test]
    fn kind_serde_roundtrip() {
        for &kind in ALL_EVENT_KINDS {
            let json = serde_json::to_string(&kind).unwrap();
            let back: EventKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back, "roundtrip failed for {json}");
        }
    }

    #[test]
    fn kind_exact_strings() {
        let expected = [
            (EventKind::AudioGenerateResult, "audio_generate_result"),
            (EventKind::AudioGenerateSummary, "audio_generate_summary"),
            (EventKind::AudioCombine, "audio_combine"),
            (EventKind::ChapterReload, "chapter_reload"),
            (EventKind::ChapterTitleRefresh, "chapter_title_refresh"),
            (EventKind::ChapterInfoRefresh, "chapter_info_refresh"),
            (EventKind::ChapterRoleRefresh, "chapter_role_refresh"),
            (EventKind::Error, "error"),
            (EventKind::Success, "success"),
        ];

        for (kind, expected_str) in expected {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{expected_str}\""), "wrong string for {kind:?}");
        }
    }

    #[test]
    fn as_str_matches_serde() {
        for &kind in ALL_EVENT_KINDS {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn parse_inverts_as_str() {
        for &kind in ALL_EVENT_KINDS {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_unknown_is_none() {
        assert_eq!(EventKind::parse("chapter_explode"), None);
        assert_eq!(EventKind::parse(""), None);
    }

    #[test]
    fn serde_rejects_unknown() {
        let result = serde_json::from_str::<EventKind>("\"not_a_kind\"");
        assert!(result.is_err());
    }

    #[test]
    fn toast_levels() {
        assert_eq!(
            EventKind::Error.toast_level(),
            Some(NotificationLevel::Error)
        );
        assert_eq!(
            EventKind::Success.toast_level(),
            Some(NotificationLevel::Success)
        );
        assert_eq!(EventKind::ChapterReload.toast_level(), None);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(
            EventKind::AudioGenerateResult.to_string(),
            "audio_generate_result"
        );
    }
}
