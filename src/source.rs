//! Decoding of documentation generator output into raw records.
//!
//! The generator writes its index as a JavaScript assignment,
//! `var documenterSearchIndex = {"docs": [...]}`. A bare JSON array and a
//! plain `{"docs": [...]}` object are accepted as well.

use crate::error::{IndexError, IndexResult};
use crate::models::RawDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

static JS_ASSIGNMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][A-Za-z0-9_$]*\s*=\s*")
        .expect("Failed to compile JS assignment regex")
});

/// Strip a leading `var name =` and a trailing `;` if present.
fn strip_js_wrapper(input: &str) -> &str {
    let body = match JS_ASSIGNMENT_REGEX.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    };
    body.trim().trim_end_matches(';').trim_end()
}

/// Decode generator output into raw records, in source order.
///
/// Array elements that are not objects decode to an empty record, which the
/// loader then treats as malformed.
pub fn decode(input: &str) -> IndexResult<Vec<RawDocument>> {
    let value: Value = serde_json::from_str(strip_js_wrapper(input))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("docs") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(IndexError::UnrecognizedPayload(
                    "`docs` is not an array".to_string(),
                ))
            }
            None => {
                return Err(IndexError::UnrecognizedPayload(
                    "object has no `docs` key".to_string(),
                ))
            }
        },
        other => {
            return Err(IndexError::UnrecognizedPayload(format!(
                "expected an array or object, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items.into_iter().map(RawDocument::from_value).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read and decode an index file.
pub fn read_file(path: &Path) -> IndexResult<Vec<RawDocument>> {
    let input = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = decode(&input)?;
    tracing::debug!(
        path = %path.display(),
        records = documents.len(),
        "Decoded search index file"
    );
    Ok(documents)
}
