//! Full-text search over generated documentation indexes.
//!
//! The [`loader`] validates raw records and builds a [`SearchIndex`]; the
//! [`engine`] scores and ranks records for a query. Both are pure and do no I/O.

pub mod engine;
pub mod index;
pub mod loader;
pub mod shared;
pub mod snippet;
pub mod tokenizer;

pub use engine::{search, SearchOptions, DEFAULT_HEADING_WEIGHT, DEFAULT_TEXT_WEIGHT};
pub use index::{Posting, SearchIndex, SkippedRecord};
pub use loader::{load, LoadOptions};
pub use shared::SharedIndex;
pub use tokenizer::{tokenize, tokenize_query};
