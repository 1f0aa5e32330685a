//! In-memory inverted index over document records.

use crate::models::DocumentRecord;
use crate::search::tokenizer::tokenize;
use std::collections::{BTreeMap, HashSet};

/// One entry of a posting list: a record that contains a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Position of the record in the index
    pub doc: usize,
    /// Token occurs in `title` or `page`
    pub in_heading: bool,
    /// Token occurs in `text`
    pub in_text: bool,
}

/// A source record that failed validation and was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the source array
    pub position: usize,
    pub reason: String,
}

/// Immutable search index built once from a document array.
///
/// Posting lists are sorted by record position, and each record appears at
/// most once per token. The token map is ordered so prefix lookups are range
/// scans.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    records: Vec<DocumentRecord>,
    postings: BTreeMap<String, Vec<Posting>>,
    skipped: Vec<SkippedRecord>,
}

impl SearchIndex {
    /// Build the token map for already validated records.
    pub(crate) fn build(records: Vec<DocumentRecord>, skipped: Vec<SkippedRecord>) -> Self {
        let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();

        for (doc, record) in records.iter().enumerate() {
            let heading: HashSet<String> = tokenize(&record.title)
                .into_iter()
                .chain(tokenize(&record.page))
                .collect();
            let body: HashSet<String> = tokenize(&record.text).into_iter().collect();

            // Sorted so posting construction does not depend on hash order
            let mut tokens: Vec<&String> = heading.union(&body).collect();
            tokens.sort();

            for token in tokens {
                postings.entry(token.clone()).or_default().push(Posting {
                    doc,
                    in_heading: heading.contains(token),
                    in_text: body.contains(token),
                });
            }
        }

        Self {
            records,
            postings,
            skipped,
        }
    }

    /// All records in source order.
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    /// Get a record by its position.
    pub fn record(&self, doc: usize) -> Option<&DocumentRecord> {
        self.records.get(doc)
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Records skipped during load.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Posting list for an exact token, empty if the token is unknown.
    #[cfg(test)]
    pub(crate) fn postings(&self, token: &str) -> &[Posting] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The indexed token equal to `token` with its posting list.
    pub fn lookup(&self, token: &str) -> Option<(&str, &[Posting])> {
        self.postings
            .get_key_value(token)
            .map(|(term, list)| (term.as_str(), list.as_slice()))
    }

    /// Posting lists of every token starting with `prefix`, in token order.
    pub fn postings_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [Posting])> + 'a {
        self.postings
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(token, _)| token.starts_with(prefix))
            .map(|(token, list)| (token.as_str(), list.as_slice()))
    }

    /// Every record at a location, in source order.
    pub fn documents_at(&self, location: &str) -> Vec<&DocumentRecord> {
        self.records
            .iter()
            .filter(|record| record.location == location)
            .collect()
    }

    /// Count of records per category tag.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentRecord, RawDocument};

    fn record(location: &str, page: &str, title: &str, text: &str, category: &str) -> DocumentRecord {
        DocumentRecord::try_from(RawDocument::new(location, page, title, text, category)).unwrap()
    }

    fn sample_index() -> SearchIndex {
        SearchIndex::build(
            vec![
                record("", "Home", "Home", "Documentation for XPalm.", "page"),
                record(
                    "#XPalm.Female",
                    "Home",
                    "XPalm.Female",
                    "A female inflorescence",
                    "type",
                ),
                record("#XPalm.Phytomer", "Home", "XPalm.Phytomer", "A phytomer", "type"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_postings_track_fields() {
        let index = sample_index();

        let female = index.postings("female");
        assert_eq!(female.len(), 1);
        assert_eq!(female[0].doc, 1);
        assert!(female[0].in_heading);
        assert!(female[0].in_text);

        let inflorescence = index.postings("inflorescence");
        assert_eq!(inflorescence.len(), 1);
        assert!(!inflorescence[0].in_heading);
        assert!(inflorescence[0].in_text);
    }

    #[test]
    fn test_postings_sorted_and_unique() {
        let index = sample_index();
        let home: Vec<usize> = index.postings("home").iter().map(|p| p.doc).collect();
        assert_eq!(home, vec![0, 1, 2]);

        let xpalm: Vec<usize> = index.postings("xpalm").iter().map(|p| p.doc).collect();
        assert_eq!(xpalm, vec![0, 1, 2]);
        assert!(!index.postings("xpalm")[0].in_heading);
    }

    #[test]
    fn test_unknown_token_has_no_postings() {
        assert!(sample_index().postings("zzz").is_empty());
    }

    #[test]
    fn test_postings_with_prefix() {
        let index = sample_index();
        let tokens: Vec<&str> = index
            .postings_with_prefix("ph")
            .map(|(token, _)| token)
            .collect();
        assert_eq!(tokens, vec!["phytomer"]);

        assert_eq!(index.postings_with_prefix("q").count(), 0);
    }

    #[test]
    fn test_documents_at_location() {
        let index = sample_index();
        assert_eq!(index.documents_at("").len(), 1);
        assert_eq!(index.documents_at("#XPalm.Female")[0].title, "XPalm.Female");
        assert!(index.documents_at("#missing").is_empty());
    }

    #[test]
    fn test_category_counts() {
        let counts = sample_index().category_counts();
        assert_eq!(counts.get("type"), Some(&2));
        assert_eq!(counts.get("page"), Some(&1));
    }

    #[test]
    fn test_empty_index() {
        let index = SearchIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.token_count(), 0);
        assert!(index.postings("anything").is_empty());
    }
}
