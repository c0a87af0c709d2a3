use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Process-wide etymology cache, keyed by normalized word.
///
/// Cloning shares the underlying map. Entries live for the lifetime of the
/// process: no eviction, no expiry, no size bound.
#[derive(Debug, Clone, Default)]
pub struct EtymologyCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl EtymologyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Last writer wins.
    pub async fn insert(&self, key: String, value: String) {
        self.entries.write().await.insert(key, value);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Cache key for a lookup input: its first whitespace-delimited token,
/// lowercased. `None` when the input has no token at all.
pub fn cache_key(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_lowercase)
}
