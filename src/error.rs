//! Error types for the docsearch MCP server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding or loading a search index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A source entry violates the required-field invariant
    #[error("Malformed record at position {position}: {reason}")]
    MalformedRecord { position: usize, reason: String },

    /// The payload is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but not a document array or a `docs` object
    #[error("Unrecognized index payload: {0}")]
    UnrecognizedPayload(String),

    /// The index file could not be read
    #[error("Failed to read index file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when running a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query produced no tokens and the caller requires at least one
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced by the search service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Query(#[from] QueryError),

    /// Reload requested but the service was built without a source path
    #[error("No index source configured for reload")]
    NoSource,

    /// The background reload task panicked or was cancelled
    #[error("Index reload task failed: {0}")]
    TaskJoin(String),
}

/// Convenience type alias for Results with IndexError
pub type IndexResult<T> = Result<T, IndexError>;

/// Convenience type alias for Results with QueryError
pub type QueryResult<T> = Result<T, QueryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
