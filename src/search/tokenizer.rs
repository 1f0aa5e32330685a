//! Tokenization shared by indexing and querying.
//!
//! A token is a maximal run of alphanumeric characters, lower-cased. Every other
//! character is a boundary, so `XPalm.add_phytomer!` yields `xpalm`, `add`,
//! `phytomer`.

/// A token together with its byte range in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// Lower-cased token
    pub token: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Split text into tokens with their positions in the original string.
pub fn token_spans(text: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_alphanumeric(), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                spans.push(span(text, s, idx));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        spans.push(span(text, s, text.len()));
    }

    spans
}

fn span(text: &str, start: usize, end: usize) -> TokenSpan {
    TokenSpan {
        token: text[start..end].to_lowercase(),
        start,
        end,
    }
}

/// Split text into lower-cased tokens, in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokenize a query, dropping repeated tokens but keeping first-seen order.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut tokens = tokenize(query);
    let mut seen = std::collections::HashSet::new();
    tokens.retain(|token| seen.insert(token.clone()));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("XPalm.add_phytomer!-Tuple{Palm, Dates.Date}"),
            vec!["xpalm", "add", "phytomer", "tuple", "palm", "dates", "date"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_separators_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  --- ... \n\n").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_digits_and_unicode() {
        assert_eq!(tokenize("Ärger mit 2 Bäumen"), vec!["ärger", "mit", "2", "bäumen"]);
    }

    #[test]
    fn test_tokenize_query_dedupes() {
        assert_eq!(tokenize_query("Palm palm LEAF palm"), vec!["palm", "leaf"]);
    }

    #[test]
    fn test_token_spans_point_into_original() {
        let text = "Female(state)\n\nA female inflorescence";
        let spans = token_spans(text);

        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].token, "female");
        assert_eq!(&text[spans[0].start..spans[0].end], "Female");
        assert_eq!(spans[3].token, "female");
        assert_eq!(&text[spans[3].start..spans[3].end], "female");
        assert_eq!(spans[4].end, text.len());
    }

    #[test]
    fn test_token_spans_match_tokenize() {
        let text = "Palm() (without arguments) creates a new Palm";
        let from_spans: Vec<String> = token_spans(text).into_iter().map(|s| s.token).collect();
        assert_eq!(from_spans, tokenize(text));
    }
}
