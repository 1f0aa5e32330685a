//! Shared fixtures for integration tests.

#![allow(dead_code)]

use docsearch_mcp_server::search::{load, LoadOptions, SearchIndex};
use docsearch_mcp_server::{source, RawDocument};
use std::path::PathBuf;

/// Path of the generator output checked in under `tests/fixtures`.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search_index.js")
}

/// Raw records of the fixture, in source order.
pub fn fixture_documents() -> Vec<RawDocument> {
    source::read_file(&fixture_path()).expect("fixture should decode")
}

/// Index built from the fixture with the default loader policy.
pub fn fixture_index() -> SearchIndex {
    load(fixture_documents(), &LoadOptions::default()).expect("fixture should load")
}

/// Index built from records given as `(location, page, title, text, category)`.
pub fn index_of(records: &[(&str, &str, &str, &str, &str)]) -> SearchIndex {
    let documents = records
        .iter()
        .map(|(location, page, title, text, category)| {
            RawDocument::new(*location, *page, *title, *text, *category)
        })
        .collect::<Vec<_>>();
    load(documents, &LoadOptions::default()).expect("records should load")
}
