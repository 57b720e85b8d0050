//! Typed client for the authoring backend's REST surface.
//!
//! Every call posts JSON and receives the `{code, msg, data}` envelope;
//! failures become [`ApiError`] values and user-visible notifications
//! through the shared `Notifier`. Endpoint wrappers live next to their
//! DTOs, split the way the backend splits its controllers.

#![deny(unsafe_code)]

pub mod client;
pub mod envelope;
pub mod errors;
pub mod model;
pub mod pinyin;
pub mod text_chapter;
pub mod text_project;

pub use client::ApiClient;
pub use envelope::{ApiEnvelope, PageRequest, PageResponse, SUCCESS_CODE};
pub use errors::{ApiError, Result};
pub use model::{ALL_BACKENDS, ModelServerConfig, TtsBackend, VoiceConfig, VoiceModel};
pub use pinyin::{PinyinCache, PinyinSource, unicode_key};
pub use text_chapter::{
    AudioTaskState, ChapterInfo, ChapterScope, DialogueParseRequest, RoleCombineRequest,
    TextChapter, TextRole, TextRoleChangeRequest,
};
pub use text_project::{ChapterSplitRequest, CreateProjectRequest, ProjectType, TextProject};
