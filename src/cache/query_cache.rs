//! Time-bounded cache of ranked query results.
//!
//! Entries expire after the configured TTL and the cache holds at most a fixed
//! number of entries. The owner clears it whenever the index is replaced.

use crate::models::ScoredMatch;
use crate::search::tokenize_query;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Default maximum number of cached queries
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Cache key: the normalized query, the result limit and the index generation.
///
/// Queries that tokenize identically ("Palm Leaf" and "palm, leaf") share an
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    tokens: Vec<String>,
    limit: usize,
    generation: u64,
}

impl QueryKey {
    pub fn new(query: &str, limit: usize) -> Self {
        Self {
            tokens: tokenize_query(query),
            limit,
            generation: 0,
        }
    }

    /// Tie the key to one generation of the served index.
    pub fn for_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    results: Arc<Vec<ScoredMatch>>,
    inserted_at: Instant,
}

/// A thread-safe result cache with time-based expiration.
///
/// A TTL of zero disables caching entirely.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    ttl: Duration,
    max_entries: usize,
}

impl QueryCache {
    /// Create a new cache with the specified TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_capacity(ttl_seconds, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl_seconds: u64, max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
            max_entries: max_entries.max(1),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Get cached results if present and not expired.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<Vec<ScoredMatch>>> {
        if !self.is_enabled() {
            return None;
        }

        let now = Instant::now();
        let entries = self.entries.read().ok()?;
        let hit = entries
            .get(key)
            .filter(|entry| now.duration_since(entry.inserted_at) < self.ttl)
            .map(|entry| entry.results.clone());
        hit
    }

    /// Store results, evicting expired entries and then the oldest one when full.
    pub fn insert(&self, key: QueryKey, results: Arc<Vec<ScoredMatch>>) {
        if !self.is_enabled() {
            return;
        }

        let now = Instant::now();
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries && !entries.contains_key(&key) {
                entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
            }
            if entries.len() >= self.max_entries && !entries.contains_key(&key) {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }

            entries.insert(
                key,
                CacheEntry {
                    results,
                    inserted_at: now,
                },
            );
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn results(title: &str) -> Arc<Vec<ScoredMatch>> {
        Arc::new(vec![ScoredMatch {
            location: format!("#{}", title),
            page: "Home".to_string(),
            title: title.to_string(),
            category: Category::Type,
            snippet: String::new(),
            score: 3,
            doc_index: 0,
        }])
    }

    #[test]
    fn test_insert_and_get() {
        let cache = QueryCache::new(60);
        cache.insert(QueryKey::new("palm", 10), results("Palm"));

        let hit = cache.get(&QueryKey::new("palm", 10)).unwrap();
        assert_eq!(hit[0].title, "Palm");
        assert!(cache.get(&QueryKey::new("palm", 5)).is_none());
    }

    #[test]
    fn test_key_normalizes_query() {
        assert_eq!(QueryKey::new("Palm  Leaf", 0), QueryKey::new("palm, leaf leaf", 0));
        assert_ne!(QueryKey::new("palm leaf", 0), QueryKey::new("leaf palm", 0));
    }

    #[test]
    fn test_key_includes_generation() {
        let cache = QueryCache::new(60);
        cache.insert(QueryKey::new("palm", 10).for_generation(1), results("Palm"));

        assert!(cache.get(&QueryKey::new("palm", 10).for_generation(1)).is_some());
        assert!(cache.get(&QueryKey::new("palm", 10).for_generation(2)).is_none());
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let cache = QueryCache::new(0);
        assert!(!cache.is_enabled());

        cache.insert(QueryKey::new("palm", 10), results("Palm"));
        assert!(cache.is_empty());
        assert!(cache.get(&QueryKey::new("palm", 10)).is_none());
    }

    #[test]
    fn test_expired_entries_are_ignored() {
        let cache = QueryCache::with_capacity(1, 8);
        cache.insert(QueryKey::new("palm", 10), results("Palm"));

        std::thread::sleep(Duration::from_millis(1100));
        assert!(cache.get(&QueryKey::new("palm", 10)).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = QueryCache::with_capacity(60, 2);
        cache.insert(QueryKey::new("leaf", 0), results("Leaf"));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert(QueryKey::new("male", 0), results("Male"));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert(QueryKey::new("palm", 0), results("Palm"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&QueryKey::new("leaf", 0)).is_none());
        assert!(cache.get(&QueryKey::new("male", 0)).is_some());
        assert!(cache.get(&QueryKey::new("palm", 0)).is_some());
    }

    #[test]
    fn test_clear() {
        let cache = QueryCache::new(60);
        cache.insert(QueryKey::new("palm", 10), results("Palm"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
