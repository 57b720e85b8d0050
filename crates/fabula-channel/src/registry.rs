//! Subscription registry: topic key → callbacks.
//!
//! Multiple callbacks may be registered under one key; all of them fire when
//! a message matches. Lookups return a snapshot of the callback list, so a
//! callback may subscribe or unsubscribe from inside a dispatch without
//! corrupting the iteration that invoked it.

use std::collections::HashMap;
use std::sync::Arc;

use fabula_core::{ChapterId, ProjectId};
use fabula_events::EventKind;
use parking_lot::RwLock;
use serde_json::Value;

/// A subscriber callback. Invoked synchronously, in message arrival order.
pub type EventCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Routing key for a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TopicKey {
    /// Messages scoped to a project.
    Project(ProjectId),
    /// Messages scoped to a chapter.
    Chapter(ChapterId),
    /// Messages carrying a symbolic event kind.
    Event(EventKind),
}

/// Maps topic keys to the callbacks interested in them.
pub struct SubscriptionRegistry {
    subscriptions: RwLock<HashMap<TopicKey, Vec<EventCallback>>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a callback under a key. Existing callbacks for the key are
    /// kept; all of them fire on a match.
    pub fn subscribe(&self, key: TopicKey, callback: EventCallback) {
        let mut subs = self.subscriptions.write();
        subs.entry(key).or_default().push(callback);
    }

    /// Unregister every callback under a key. No-op if the key is absent.
    pub fn remove(&self, key: &TopicKey) {
        let mut subs = self.subscriptions.write();
        let _ = subs.remove(key);
    }

    /// Remove all subscriptions. Used on explicit disconnect.
    pub fn clear(&self) {
        self.subscriptions.write().clear();
    }

    /// Snapshot of the callbacks registered under a key (possibly empty).
    #[must_use]
    pub fn lookup(&self, key: &TopicKey) -> Vec<EventCallback> {
        self.subscriptions
            .read()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of keys with at least one callback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Whether the registry has no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
