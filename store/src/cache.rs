//! Explicit query cache with per-key time expiry.
//!
//! Cached views are keyed by stable, semantic names derived from the
//! query arguments (see [`queries`](crate::queries)). Writers
//! invalidate keys explicitly after a successful mutation; entries
//! otherwise expire after the configured TTL. Values are stored as
//! JSON so one cache can serve every query shape.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Shared cache for query-layer results.
#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a live entry. Expired entries count as absent and are
    /// dropped.
    pub async fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Entry expired between reads at worst; removing is idempotent.
        self.entries.write().await.remove(key);
        None
    }

    /// Store `value` under `key` with a fresh TTL.
    pub async fn insert(&self, key: &str, value: Value) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Mark the view under `key` stale so the next read recomputes it.
    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Whether a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
