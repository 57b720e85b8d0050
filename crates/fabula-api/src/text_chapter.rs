//! Chapter, role, and sentence endpoints (`/api/textChapter/...`).

use serde::{Deserialize, Serialize};

use fabula_core::{ChapterId, ProjectId};

use crate::client::ApiClient;
use crate::envelope::{PageRequest, PageResponse};
use crate::errors::Result;
use crate::model::VoiceConfig;

/// Server-side progress of a sentence's audio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioTaskState {
    /// Nothing generated yet.
    Init,
    /// Generation in flight.
    Process,
    /// Audio generated.
    Created,
    /// Text edited after generation; audio is stale.
    Modified,
    /// Merged into the chapter export.
    Combined,
}

impl AudioTaskState {
    /// Numeric code used on the wire.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Init => 0,
            Self::Process => 1,
            Self::Created => 2,
            Self::Modified => 3,
            Self::Combined => 4,
        }
    }

    /// Map a wire code back to a state, `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Init),
            1 => Some(Self::Process),
            2 => Some(Self::Created),
            3 => Some(Self::Modified),
            4 => Some(Self::Combined),
            _ => None,
        }
    }
}

/// One chapter of a project.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChapter {
    /// Row id.
    pub id: i64,
    /// Owning project.
    pub project_id: ProjectId,
    /// Stable chapter identifier used for scoping.
    pub chapter_id: ChapterId,
    /// Display name.
    pub chapter_name: String,
    /// Regex marking spoken dialogue in this chapter.
    #[serde(default)]
    pub dialogue_pattern: String,
    /// Sentence count.
    #[serde(default)]
    pub text_num: u32,
    /// Distinct role count.
    #[serde(default)]
    pub role_num: u32,
}

/// A speaker within a project, with its assigned voice.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRole {
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning chapter; absent for project-wide common roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    /// Speaker name as parsed from the text.
    pub role: String,
    /// Perceived gender, used for voice suggestions.
    #[serde(default)]
    pub gender: String,
    /// Perceived age group, used for voice suggestions.
    #[serde(default)]
    pub age_group: String,
    /// How many sentences this role speaks.
    #[serde(default)]
    pub role_count: u32,
    /// Assigned voice.
    #[serde(flatten)]
    pub voice: VoiceConfig,
}

/// One parsed sentence with its audio bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInfo {
    /// Row id.
    pub id: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning chapter.
    pub chapter_id: ChapterId,
    /// Zero-based paragraph position.
    pub paragraph_index: u32,
    /// Zero-based sentence position within the paragraph.
    pub sentence_index: u32,
    /// Sentence text.
    pub text: String,
    /// Detected language of the text.
    #[serde(default)]
    pub text_lang: String,
    /// Whether the sentence is spoken dialogue.
    #[serde(default)]
    pub dialogue_flag: bool,
    /// Speaker, when dialogue.
    #[serde(default)]
    pub role: String,
    /// Playback volume multiplier.
    #[serde(default)]
    pub audio_volume: f32,
    /// Playback speed multiplier.
    #[serde(default)]
    pub audio_speed: f32,
    /// Silence after this sentence, in milliseconds.
    #[serde(default)]
    pub next_audio_interval: u32,
    /// Wire code for the audio task state; see [`AudioTaskState::from_code`].
    #[serde(default)]
    pub audio_state: i32,
    /// Generated audio length, in milliseconds.
    #[serde(default)]
    pub audio_length: u64,
    /// Whether the sentence is included in exports.
    #[serde(default)]
    pub audio_export_flag: bool,
    /// Where the generated audio can be fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Assigned voice.
    #[serde(flatten)]
    pub voice: VoiceConfig,
}

impl ChapterInfo {
    /// The audio task state, `None` if the server sent an unknown code.
    #[must_use]
    pub fn audio_task_state(&self) -> Option<AudioTaskState> {
        AudioTaskState::from_code(self.audio_state)
    }
}

/// Scope parameters shared by most chapter endpoints.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterScope {
    /// Owning project.
    pub project_id: ProjectId,
    /// Target chapter.
    pub chapter_id: ChapterId,
}

/// Parameters for parsing a chapter's text into dialogue sentences.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueParseRequest {
    /// Owning project.
    pub project_id: ProjectId,
    /// Target chapter.
    pub chapter_id: ChapterId,
    /// Regex marking spoken dialogue.
    pub dialogue_pattern: String,
    /// Chapter text to parse.
    pub text_content: String,
}

/// Parameters for merging one role into another.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCombineRequest {
    /// Owning project.
    pub project_id: ProjectId,
    /// Target chapter.
    pub chapter_id: ChapterId,
    /// Role to fold away.
    pub from_role_name: String,
    /// Role that absorbs its sentences.
    pub to_role_name: String,
}

/// Parameters for reassigning one sentence to a different role.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRoleChangeRequest {
    /// Owning project.
    pub project_id: ProjectId,
    /// Target chapter.
    pub chapter_id: ChapterId,
    /// Sentence to reassign.
    pub chapter_info_id: String,
    /// New speaker name.
    pub from_role_name: String,
    /// Whether the new speaker is a chapter role or a common role.
    pub from_role_type: String,
    /// Also adopt the new role's voice assignment.
    pub change_model: bool,
}

impl ApiClient {
    /// Page through a project's chapters.
    pub async fn chapters(
        &self,
        project_id: &ProjectId,
        page: &PageRequest,
    ) -> Result<PageResponse<TextChapter>> {
        self.post(
            "/api/textChapter/chapters",
            &serde_json::json!({
                "projectId": project_id,
                "current": page.current,
                "pageSize": page.page_size,
            }),
        )
        .await
    }

    /// Fetch a chapter's raw text.
    pub async fn chapter_content(&self, scope: &ChapterScope) -> Result<String> {
        self.post("/api/textChapter/getContent", scope).await
    }

    /// Preview a dialogue parse without persisting it.
    pub async fn tmp_dialogue_parse(
        &self,
        request: &DialogueParseRequest,
    ) -> Result<Vec<ChapterInfo>> {
        self.post("/api/textChapter/tmpDialogueParse", request).await
    }

    /// Parse the chapter's dialogue and persist the result.
    pub async fn dialogue_parse(&self, request: &DialogueParseRequest) -> Result<()> {
        self.post_ack("/api/textChapter/dialogueParse", request).await
    }

    /// Fetch a chapter's parsed sentences.
    pub async fn chapter_infos(&self, scope: &ChapterScope) -> Result<Vec<ChapterInfo>> {
        self.post("/api/textChapter/chapterInfos", scope).await
    }

    /// Fetch a chapter's roles.
    pub async fn roles(&self, scope: &ChapterScope) -> Result<Vec<TextRole>> {
        self.post("/api/textChapter/roles", scope).await
    }

    /// Rename a role.
    pub async fn update_role_name(&self, role: &TextRole) -> Result<()> {
        self.post_ack("/api/textChapter/updateRoleName", role).await
    }

    /// Update a role's voice assignment and attributes.
    pub async fn update_role(&self, role: &TextRole) -> Result<()> {
        self.post_ack("/api/textChapter/updateRole", role).await
    }

    /// Merge one role's sentences into another role.
    pub async fn role_combine(&self, request: &RoleCombineRequest) -> Result<()> {
        self.post_ack("/api/textChapter/roleCombine", request).await
    }

    /// Reassign a single sentence to a different role.
    pub async fn text_role_change(&self, request: &TextRoleChangeRequest) -> Result<()> {
        self.post_ack("/api/textChapter/textRoleChange", request).await
    }

    /// Fetch the project-wide common roles.
    pub async fn common_roles(&self, project_id: &ProjectId) -> Result<Vec<TextRole>> {
        self.post(
            "/api/textChapter/commonRoles",
            &serde_json::json!({ "projectId": project_id }),
        )
        .await
    }

    /// Create a project-wide common role.
    pub async fn create_common_role(&self, role: &TextRole) -> Result<()> {
        self.post_ack("/api/textChapter/createCommonRole", role).await
    }

    /// Update a project-wide common role.
    pub async fn update_common_role(&self, role: &TextRole) -> Result<()> {
        self.post_ack("/api/textChapter/updateCommonRole", role).await
    }

    /// Delete a project-wide common role.
    pub async fn delete_common_role(&self, role: &TextRole) -> Result<()> {
        self.post_ack("/api/textChapter/deleteCommonRole", role).await
    }

    /// Whether a role inference result is waiting for this chapter.
    pub async fn check_role_inference(&self, scope: &ChapterScope) -> Result<bool> {
        self.post("/api/textChapter/checkRoleInference", scope).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
