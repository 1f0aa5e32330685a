//! Search tools for documentation lookup with result caching.
//!
//! Provides ranked search over the served index, lookup by location, index
//! statistics and hot reload from the configured index file.

use crate::cache::{QueryCache, QueryKey};
use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{DocumentRecord, ScoredMatch};
use crate::observability::{MetricsSnapshot, SearchMetrics, Timer};
use crate::search::{self, LoadOptions, SearchIndex, SearchOptions, SharedIndex};
use crate::source;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parameters for a search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Search query string
    pub query: String,

    /// Maximum number of results; `None` uses the configured default, `Some(0)`
    /// returns every match
    pub limit: Option<usize>,
}

/// Response from search with cache metadata.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub results: Arc<Vec<ScoredMatch>>,

    /// Whether the results came from cache
    pub from_cache: bool,

    /// Number of records in the index that answered
    pub index_size: usize,
}

/// Summary of the served index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub distinct_tokens: usize,
    pub skipped_records: usize,
    pub categories: BTreeMap<String, usize>,
    pub source: Option<PathBuf>,
    pub metrics: MetricsSnapshot,
}

/// Outcome of a reload.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadSummary {
    pub records: usize,
    pub skipped_records: usize,
    pub previous_records: usize,
    pub duration_ms: u128,
}

/// Search tools over a hot-swappable index.
#[derive(Clone)]
pub struct DocSearchTools {
    index: SharedIndex,
    options: SearchOptions,
    load_options: LoadOptions,
    source_path: Option<PathBuf>,
    cache: QueryCache,
    metrics: SearchMetrics,
}

impl DocSearchTools {
    /// Create search tools over an already loaded index.
    ///
    /// # Arguments
    /// * `index` - The index to serve
    /// * `options` - Query options; `options.limit` is the default result limit
    /// * `cache_ttl_secs` - Result cache time-to-live in seconds, 0 disables
    pub fn new(index: SearchIndex, options: SearchOptions, cache_ttl_secs: u64) -> Self {
        Self::assemble(index, options, cache_ttl_secs, 0)
    }

    fn assemble(
        index: SearchIndex,
        options: SearchOptions,
        cache_ttl_secs: u64,
        load_ms: u128,
    ) -> Self {
        let metrics = SearchMetrics::new();
        metrics.track_index_load(load_ms, index.len(), index.skipped().len());

        Self {
            index: SharedIndex::new(index),
            options,
            load_options: LoadOptions::default(),
            source_path: None,
            cache: QueryCache::new(cache_ttl_secs),
            metrics,
        }
    }

    /// Load the configured index file and build search tools for it.
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        let load_options = config.load_options();
        let timer = Timer::new("initial_index_load");
        let index = load_from_path(&config.index_path, &load_options)?;
        let duration_ms = timer.finish();

        Ok(Self::assemble(
            index,
            config.search_options(),
            config.query_cache_ttl_secs,
            duration_ms,
        )
        .with_source(config.index_path.clone(), load_options))
    }

    /// Remember where the index came from so it can be reloaded.
    pub fn with_source(mut self, path: PathBuf, load_options: LoadOptions) -> Self {
        self.source_path = Some(path);
        self.load_options = load_options;
        self
    }

    /// Run a ranked search against the served index.
    pub fn search(&self, params: SearchParams) -> ServiceResult<SearchResponse> {
        let limit = params.limit.unwrap_or(self.options.limit);
        let (generation, index) = self.index.versioned();
        let key = QueryKey::new(&params.query, limit).for_generation(generation);

        if let Some(results) = self.cache.get(&key) {
            tracing::debug!("Using cached results for {:?}", params.query);
            self.metrics.track_cache_access(true);
            self.metrics.track_search_query(0, results.len());
            return Ok(SearchResponse {
                results,
                from_cache: true,
                index_size: index.len(),
            });
        }
        if self.cache.is_enabled() {
            self.metrics.track_cache_access(false);
        }

        let timer = Timer::new("search");
        let results = Arc::new(search::search(
            &index,
            &params.query,
            &self.options.with_limit(limit),
        )?);
        self.metrics.track_search_query(timer.finish(), results.len());

        self.cache.insert(key, results.clone());

        Ok(SearchResponse {
            results,
            from_cache: false,
            index_size: index.len(),
        })
    }

    /// Every record at a location, in source order.
    pub fn documents_at(&self, location: &str) -> Vec<DocumentRecord> {
        self.index
            .snapshot()
            .documents_at(location)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        let index = self.index.snapshot();
        IndexStats {
            records: index.len(),
            distinct_tokens: index.token_count(),
            skipped_records: index.skipped().len(),
            categories: index.category_counts(),
            source: self.source_path.clone(),
            metrics: self.metrics.snapshot(),
        }
    }

    /// Swap in a new index and drop cached results.
    pub fn replace_index(&self, index: SearchIndex) -> Arc<SearchIndex> {
        let previous = self.index.replace(index);
        self.cache.clear();
        previous
    }

    /// Re-read the source file, build a new index and swap it in.
    ///
    /// The current index keeps serving until the new one is complete. On
    /// failure the current index stays in place.
    pub async fn reload(&self) -> ServiceResult<ReloadSummary> {
        let path = self.source_path.clone().ok_or(ServiceError::NoSource)?;
        let load_options = self.load_options;

        tracing::info!("Reloading search index from {}", path.display());
        let timer = Timer::new("index_reload");

        let index = tokio::task::spawn_blocking(move || load_from_path(&path, &load_options))
            .await
            .map_err(|e| ServiceError::TaskJoin(e.to_string()))??;

        let records = index.len();
        let skipped_records = index.skipped().len();
        let previous = self.replace_index(index);
        let duration_ms = timer.finish();

        self.metrics
            .track_index_load(duration_ms, records, skipped_records);

        Ok(ReloadSummary {
            records,
            skipped_records,
            previous_records: previous.len(),
            duration_ms,
        })
    }

    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }
}

/// Read, decode and load an index file.
fn load_from_path(path: &Path, options: &LoadOptions) -> ServiceResult<SearchIndex> {
    let documents = source::read_file(path)?;
    Ok(search::load(documents, options)?)
}
