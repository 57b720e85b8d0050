//! # fabula-settings
//!
//! Layered configuration for the fabula client tools.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`FabulaSettings::default()`]
//! 2. **User file**: `~/.fabula/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `FABULA_*` overrides (highest priority)
//!
//! There is no global settings instance; the composition root loads
//! settings once and passes them down explicitly.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{ChannelSettings, FabulaSettings, LoggingSettings, ServerSettings};
