//! Search tools backing the MCP handlers.
//!
//! These wrap the pure search core with the served index, the query cache and
//! metrics.

pub mod search;

pub use search::{DocSearchTools, IndexStats, ReloadSummary, SearchParams, SearchResponse};
