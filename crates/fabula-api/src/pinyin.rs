//! Pinyin lookup cache.
//!
//! The backend ships a character → readings table keyed by unicode notation
//! (`U+4E2D` style). [`PinyinCache`] holds it in a concurrent map, filled in
//! bulk through a [`PinyinSource`] on first use; lookups after that are
//! local.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use crate::client::ApiClient;
use crate::errors::Result;

/// Unicode key for a character, e.g. `中` → `U+4E2D`.
#[must_use]
pub fn unicode_key(ch: char) -> String {
    format!("U+{:04X}", ch as u32)
}

/// Where a pinyin table can be fetched from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PinyinSource: Send + Sync {
    /// Fetch the full character → readings table.
    async fn fetch_pinyin_table(&self) -> Result<HashMap<String, Vec<String>>>;
}

#[async_trait]
impl PinyinSource for ApiClient {
    async fn fetch_pinyin_table(&self) -> Result<HashMap<String, Vec<String>>> {
        self.post("/api/pinyin/getPinyinData", &serde_json::json!({}))
            .await
    }
}

/// Concurrent read-through cache over the pinyin table.
#[derive(Debug, Default)]
pub struct PinyinCache {
    entries: DashMap<String, Vec<String>>,
    loaded: AtomicBool,
}

impl PinyinCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache contents with the table from `source`. Returns the
    /// number of entries loaded.
    pub async fn load_from(&self, source: &dyn PinyinSource) -> Result<usize> {
        let table = source.fetch_pinyin_table().await?;
        self.entries.clear();
        for (key, readings) in table {
            let _ = self.entries.insert(key, readings);
        }
        self.loaded.store(true, Ordering::Release);
        info!(entries = self.entries.len(), "pinyin table loaded");
        Ok(self.entries.len())
    }

    /// The readings of `ch`, fetching the table through `source` on first
    /// use. Two racing first lookups may each fetch; both write the same
    /// table.
    pub async fn readings(
        &self,
        ch: char,
        source: &dyn PinyinSource,
    ) -> Result<Option<Vec<String>>> {
        if !self.loaded.load(Ordering::Acquire) {
            let _ = self.load_from(source).await?;
        }
        Ok(self.lookup(ch))
    }

    /// The readings of `ch`, if already cached.
    #[must_use]
    pub fn lookup(&self, ch: char) -> Option<Vec<String>> {
        self.entries.get(&unicode_key(ch)).map(|r| r.value().clone())
    }

    /// Number of cached characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
