//! Docsearch MCP Server - full-text search over generated documentation indexes.
//!
//! A documentation generator emits a static search index: an array of records
//! with a location, page, title, text and category. This library loads that
//! array into an immutable in-memory index and answers ranked queries over it,
//! and the binary serves those queries over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **models**: Raw and validated document records, ranked matches
//! - **source**: Decoding of the generator's payload (JS wrapper, object or array)
//! - **search**: Tokenizer, index loader, query engine and swappable index handle
//! - **cache**: Short-lived cache of ranked results
//! - **observability**: Load, query and cache metrics
//! - **tools**: Search tools combining the index, cache and metrics
//! - **server**: MCP protocol server
//! - **config**: Configuration from environment variables
//! - **error**: Custom error types for precise error handling

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod search;
pub mod server;
pub mod source;
pub mod tools;

pub use cache::{QueryCache, QueryKey};
pub use config::Config;
pub use error::{ConfigError, IndexError, QueryError, ServiceError};
pub use models::{Category, DocumentRecord, RawDocument, ScoredMatch};
pub use observability::{MetricsSnapshot, SearchMetrics};
pub use search::{load, search, LoadOptions, SearchIndex, SearchOptions, SharedIndex};
pub use server::DocSearchMcpServer;
pub use tools::{DocSearchTools, IndexStats, SearchParams, SearchResponse};
