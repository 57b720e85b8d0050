//! Connection context.
//!
//! A [`ChannelContext`] holds everything needed to open (and re-open) a
//! connection: the WebSocket base URL and an optional project scope. It is
//! immutable for the lifetime of a channel; reconnects reuse it verbatim,
//! so the scoping identifier can never drift across attempts.

use fabula_core::ProjectId;

use crate::errors::{ChannelError, Result};

/// Immutable parameters for opening a push connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelContext {
    base: String,
    project_id: Option<ProjectId>,
}

impl ChannelContext {
    /// Context for the process-wide channel (`<base>/ws/global`).
    pub fn global(base: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: validate_base(base.into())?,
            project_id: None,
        })
    }

    /// Context for a project-scoped channel
    /// (`<base>/ws/text?projectId=<id>`).
    pub fn for_project(base: impl Into<String>, project_id: ProjectId) -> Result<Self> {
        Ok(Self {
            base: validate_base(base.into())?,
            project_id: Some(project_id),
        })
    }

    /// The project scope, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// The full connection URL for this context.
    #[must_use]
    pub fn url(&self) -> String {
        match &self.project_id {
            Some(id) => format!("{}/ws/text?projectId={id}", self.base),
            None => format!("{}/ws/global", self.base),
        }
    }
}

fn validate_base(base: String) -> Result<String> {
    let trimmed = base.trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("ws://")
        .or_else(|| trimmed.strip_prefix("wss://"))
        .ok_or_else(|| ChannelError::InvalidEndpoint(base.clone()))?;
    if rest.is_empty() {
        return Err(ChannelError::InvalidEndpoint(base));
    }
    Ok(trimmed.to_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
