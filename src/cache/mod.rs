//! Caching for query results.
//!
//! This module provides a short-lived cache of ranked results so repeated
//! queries (one per keystroke) skip scoring.

pub mod query_cache;

pub use query_cache::{QueryCache, QueryKey};
