//! Index loader: validates raw records and builds a [`SearchIndex`].
//!
//! The loader performs no I/O. Callers obtain raw records from
//! [`crate::source`] or construct them directly.

use crate::error::{IndexError, IndexResult};
use crate::models::{DocumentRecord, RawDocument};
use crate::search::index::{SearchIndex, SkippedRecord};

/// Policy for records that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip malformed records with a warning instead of failing the load
    pub skip_malformed: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_malformed: true,
        }
    }
}

/// Validate `documents` and build an index from the well-formed ones.
///
/// With `skip_malformed` set, every malformed record is logged and recorded in
/// [`SearchIndex::skipped`]. Otherwise the first malformed record fails the
/// load with [`IndexError::MalformedRecord`]. An empty input yields an empty
/// index.
pub fn load<I>(documents: I, options: &LoadOptions) -> IndexResult<SearchIndex>
where
    I: IntoIterator<Item = RawDocument>,
{
    let start = std::time::Instant::now();
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (position, raw) in documents.into_iter().enumerate() {
        match DocumentRecord::try_from(raw) {
            Ok(record) => records.push(record),
            Err(reason) if options.skip_malformed => {
                tracing::warn!(position, reason = %reason, "Skipping malformed search record");
                skipped.push(SkippedRecord { position, reason });
            }
            Err(reason) => return Err(IndexError::MalformedRecord { position, reason }),
        }
    }

    let index = SearchIndex::build(records, skipped);

    tracing::debug!(
        "Search index built in {}ms ({} records, {} tokens, {} skipped)",
        start.elapsed().as_millis(),
        index.len(),
        index.token_count(),
        index.skipped().len()
    );

    Ok(index)
}
