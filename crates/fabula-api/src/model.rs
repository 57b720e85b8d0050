//! Voice model backends and their endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::errors::Result;

/// The TTS engines the backend can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsBackend {
    /// GPT-SoVITS.
    GptSovits,
    /// Fish-Speech.
    FishSpeech,
    /// ChatTTS.
    ChatTts,
    /// Microsoft Edge TTS.
    EdgeTts,
}

/// All supported backends, in display order.
pub const ALL_BACKENDS: [TtsBackend; 4] = [
    TtsBackend::GptSovits,
    TtsBackend::FishSpeech,
    TtsBackend::ChatTts,
    TtsBackend::EdgeTts,
];

impl TtsBackend {
    /// Wire identifier, as carried in `amType` fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GptSovits => "gpt_sovits",
            Self::FishSpeech => "fish_speech",
            Self::ChatTts => "chat_tts",
            Self::EdgeTts => "edge_tts",
        }
    }

    /// URL path segment under `/api/model/`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::GptSovits => "gpt-sovits",
            Self::FishSpeech => "fish-speech",
            Self::ChatTts => "chat-tts",
            Self::EdgeTts => "edge-tts",
        }
    }
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable voice model on a backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceModel {
    /// Row id.
    pub id: i64,
    /// Model display name.
    pub name: String,
    /// Grouping label in the model picker.
    #[serde(default)]
    pub group: String,
    /// GPT weights file, for backends that use one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt_weights: Option<String>,
    /// SoVITS weights file, for backends that use one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sovits_weights: Option<String>,
}

/// Backend server connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelServerConfig {
    /// Where the backend's inference server listens.
    pub server_url: String,
}

/// Voice assignment carried by roles and chapter sentences.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Which engine renders this voice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub am_type: Option<TtsBackend>,
    /// Selected model configuration id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_id: Option<String>,
    /// Selected model configuration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_name: Option<String>,
    /// Engine-specific parameters, opaque JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_params_json: Option<String>,
}

impl ApiClient {
    /// List the voice models available on `backend`.
    pub async fn voice_models(&self, backend: TtsBackend) -> Result<Vec<VoiceModel>> {
        let path = format!("/api/model/{}/queryModels", backend.path_segment());
        self.post(&path, &serde_json::json!({})).await
    }

    /// Read `backend`'s inference server settings.
    pub async fn model_server_config(&self, backend: TtsBackend) -> Result<ModelServerConfig> {
        let path = format!("/api/model/{}/serverConfig", backend.path_segment());
        self.post(&path, &serde_json::json!({})).await
    }

    /// Point `backend` at a different inference server.
    pub async fn update_model_server_url(&self, backend: TtsBackend, server_url: &str) -> Result<()> {
        let path = format!("/api/model/{}/updateServerUrl", backend.path_segment());
        self.post_ack(&path, &serde_json::json!({ "serverUrl": server_url }))
            .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
