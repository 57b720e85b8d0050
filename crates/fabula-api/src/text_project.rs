//! Project endpoints (`/api/textProject/...`).

use serde::{Deserialize, Serialize};

use fabula_core::ProjectId;

use crate::client::ApiClient;
use crate::errors::Result;

/// How a project's source text is organized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// A novel split into chapters by pattern.
    LongText,
    /// A single short passage.
    ShortText,
    /// Pre-formatted dialogue text.
    FormatText,
}

/// One authoring project.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProject {
    /// Row id.
    pub id: i64,
    /// Stable project identifier used for scoping.
    pub project_id: ProjectId,
    /// Display name.
    pub project_name: String,
    /// Text organization.
    pub project_type: ProjectType,
    /// Number of chapters split out so far.
    #[serde(default)]
    pub chapter_count: u32,
}

/// Parameters for creating a project.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Display name.
    pub project_name: String,
    /// Text organization.
    pub project_type: ProjectType,
    /// Raw source text to import.
    pub text_content: String,
}

/// Parameters for splitting a project into chapters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSplitRequest {
    /// Project to split.
    pub project_id: ProjectId,
    /// Regex marking chapter boundaries.
    pub chapter_pattern: String,
    /// Regex marking spoken dialogue.
    pub dialogue_pattern: String,
}

impl ApiClient {
    /// Create a project from raw text.
    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<()> {
        self.post_ack("/api/textProject/create", request).await
    }

    /// List every project.
    pub async fn list_projects(&self) -> Result<Vec<TextProject>> {
        self.post("/api/textProject/list", &serde_json::json!({}))
            .await
    }

    /// Preview a chapter split without persisting it. Returns the chapter
    /// titles the pattern would produce.
    pub async fn tmp_chapter_split(&self, request: &ChapterSplitRequest) -> Result<Vec<String>> {
        self.post("/api/textProject/tmpChapterSplit", request).await
    }

    /// Split the project into chapters and persist the result.
    pub async fn chapter_split(&self, request: &ChapterSplitRequest) -> Result<()> {
        self.post_ack("/api/textProject/chapterSplit", request).await
    }

    /// Delete a project and everything under it.
    pub async fn delete_project(&self, project: &TextProject) -> Result<()> {
        self.post_ack("/api/textProject/delete", project).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
