//! Counters for index loads, queries and the query cache.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics for the search service.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    index_loads_total: Arc<AtomicU64>,
    records_indexed: Arc<AtomicU64>,
    records_skipped: Arc<AtomicU64>,
    queries_total: Arc<AtomicU64>,
    empty_results_total: Arc<AtomicU64>,
    cache_hits_total: Arc<AtomicU64>,
    cache_misses_total: Arc<AtomicU64>,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub index_loads_total: u64,
    pub records_indexed: u64,
    pub records_skipped: u64,
    pub queries_total: u64,
    pub empty_results_total: u64,
    pub cache_hits_total: u64,
    pub cache_misses_total: u64,
    pub cache_hit_rate: f64,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            index_loads_total: Arc::new(AtomicU64::new(0)),
            records_indexed: Arc::new(AtomicU64::new(0)),
            records_skipped: Arc::new(AtomicU64::new(0)),
            queries_total: Arc::new(AtomicU64::new(0)),
            empty_results_total: Arc::new(AtomicU64::new(0)),
            cache_hits_total: Arc::new(AtomicU64::new(0)),
            cache_misses_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed index load. Record gauges reflect the latest load.
    pub fn track_index_load(&self, duration_ms: u128, indexed: usize, skipped: usize) {
        self.index_loads_total.fetch_add(1, Ordering::Relaxed);
        self.records_indexed.store(indexed as u64, Ordering::Relaxed);
        self.records_skipped.store(skipped as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            indexed = indexed,
            skipped = skipped,
            "Search index loaded"
        );
    }

    /// Track a cache access.
    pub fn track_cache_access(&self, hit: bool) {
        if hit {
            self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Query cache hit");
        } else {
            self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Query cache miss");
        }
    }

    /// Track a search query.
    pub fn track_search_query(&self, duration_ms: u128, result_count: usize) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        if result_count == 0 {
            self.empty_results_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    pub fn queries_total(&self) -> u64 {
        self.queries_total.load(Ordering::Relaxed)
    }

    pub fn cache_hits_total(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn cache_misses_total(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    /// Get the cache hit rate (0.0 to 1.0).
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits_total() as f64;
        let total = (self.cache_hits_total() + self.cache_misses_total()) as f64;

        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            index_loads_total: self.index_loads_total.load(Ordering::Relaxed),
            records_indexed: self.records_indexed.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
            queries_total: self.queries_total(),
            empty_results_total: self.empty_results_total.load(Ordering::Relaxed),
            cache_hits_total: self.cache_hits_total(),
            cache_misses_total: self.cache_misses_total(),
            cache_hit_rate: self.cache_hit_rate(),
        }
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
