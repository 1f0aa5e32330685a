//! Observability module for monitoring and metrics.
//!
//! This module tracks index loads, queries and cache effectiveness, and logs
//! them through `tracing`.

pub mod metrics;

pub use metrics::{MetricsSnapshot, SearchMetrics, Timer};
