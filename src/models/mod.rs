//! Data models for generated documentation search indexes.
//!
//! This module contains the raw records as the documentation generator emits
//! them, the validated records held by an index, and the matches returned by a
//! query.

pub mod document;

pub use document::{Category, DocumentRecord, RawDocument, ScoredMatch};
