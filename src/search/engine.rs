//! Query engine: scores and ranks records of a [`SearchIndex`].
//!
//! Each distinct query token adds to the score of every record containing it:
//! `heading_weight` when the token occurs in the record's `title` or `page`,
//! `text_weight` when it only occurs in `text`. Records are ordered by score,
//! then by source position.

use crate::error::{QueryError, QueryResult};
use crate::models::ScoredMatch;
use crate::search::index::{Posting, SearchIndex};
use crate::search::snippet::{make_snippet, DEFAULT_CONTEXT_CHARS};
use crate::search::tokenizer::tokenize_query;
use std::collections::{HashMap, HashSet};

/// Default weight of a token matched in `title` or `page`
pub const DEFAULT_HEADING_WEIGHT: u32 = 3;

/// Default weight of a token matched only in `text`
pub const DEFAULT_TEXT_WEIGHT: u32 = 1;

/// Tunable query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of matches; 0 returns every match
    pub limit: usize,

    /// Score added when a query token occurs in `title` or `page` (default 3)
    pub heading_weight: u32,

    /// Score added when a query token occurs only in `text` (default 1)
    pub text_weight: u32,

    /// Let every query token also match indexed tokens it is a prefix of
    pub prefix_match: bool,

    /// Fail with `InvalidQuery` instead of returning nothing for a query with no tokens
    pub reject_empty_query: bool,

    /// Characters of context on each side of the snippet match
    pub snippet_context_chars: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            heading_weight: DEFAULT_HEADING_WEIGHT,
            text_weight: DEFAULT_TEXT_WEIGHT,
            prefix_match: false,
            reject_empty_query: false,
            snippet_context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }
}

impl SearchOptions {
    /// Copy of these options with a different result limit.
    pub fn with_limit(&self, limit: usize) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    fn weight(&self, posting: &Posting) -> u32 {
        if posting.in_heading {
            self.heading_weight
        } else if posting.in_text {
            self.text_weight
        } else {
            0
        }
    }
}

/// Search the index and return ranked matches.
///
/// The result is a pure function of the arguments. A query without tokens
/// returns an empty list, or `InvalidQuery` when
/// [`SearchOptions::reject_empty_query`] is set.
pub fn search(
    index: &SearchIndex,
    query: &str,
    options: &SearchOptions,
) -> QueryResult<Vec<ScoredMatch>> {
    let tokens = tokenize_query(query);

    if tokens.is_empty() {
        if options.reject_empty_query {
            return Err(QueryError::InvalidQuery(format!(
                "query {:?} contains no searchable terms",
                query
            )));
        }
        return Ok(Vec::new());
    }

    let mut scores: HashMap<usize, u32> = HashMap::new();
    let mut matched_terms: HashSet<&str> = HashSet::new();

    for token in &tokens {
        // Best contribution per record for this query token
        let mut token_scores: HashMap<usize, u32> = HashMap::new();
        let mut credit = |postings: &[Posting]| -> bool {
            let mut any = false;
            for posting in postings {
                let weight = options.weight(posting);
                if weight == 0 {
                    continue;
                }
                any = true;
                let best = token_scores.entry(posting.doc).or_insert(0);
                *best = (*best).max(weight);
            }
            any
        };

        if options.prefix_match {
            for (term, postings) in index.postings_with_prefix(token) {
                if credit(postings) {
                    matched_terms.insert(term);
                }
            }
        } else if let Some((term, postings)) = index.lookup(token) {
            if credit(postings) {
                matched_terms.insert(term);
            }
        }

        for (doc, weight) in token_scores {
            let score = scores.entry(doc).or_insert(0);
            *score = score.saturating_add(weight);
        }
    }

    let mut ranked: Vec<(usize, u32)> = scores.into_iter().filter(|(_, s)| *s > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if options.limit > 0 {
        ranked.truncate(options.limit);
    }

    tracing::debug!(
        query = %query,
        tokens = tokens.len(),
        matches = ranked.len(),
        "Query evaluated"
    );

    Ok(ranked
        .into_iter()
        .filter_map(|(doc, score)| {
            let record = index.record(doc)?;
            Some(ScoredMatch {
                location: record.location.clone(),
                page: record.page.clone(),
                title: record.title.clone(),
                category: record.category.clone(),
                snippet: make_snippet(
                    &record.text,
                    |t| matched_terms.contains(t),
                    options.snippet_context_chars,
                ),
                score,
                doc_index: doc,
            })
        })
        .collect())
}
