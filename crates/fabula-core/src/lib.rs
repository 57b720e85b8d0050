//! # fabula-core
//!
//! Foundation types for the Fabula text-to-speech authoring client.
//!
//! This crate provides the shared vocabulary the other Fabula crates depend
//! on:
//!
//! - **Branded IDs**: `ProjectId`, `ChapterId`, `RoleId` as newtypes for type
//!   safety
//! - **Notifications**: the [`Notifier`] seam through which both the event
//!   channel and the REST client surface user-visible success/error toasts

#![deny(unsafe_code)]

pub mod ids;
pub mod notify;

pub use ids::{ChapterId, ProjectId, RoleId};
pub use notify::{LogNotifier, MemoryNotifier, Notification, NotificationLevel, Notifier};
