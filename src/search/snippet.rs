//! Snippet generation for query results.

use crate::search::tokenizer::token_spans;

/// Maximum snippet length in characters
pub const MAX_SNIPPET_LENGTH: usize = 160;

/// Default context characters to show before and after the match
pub const DEFAULT_CONTEXT_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// Byte offset `n` characters before `from`, or 0.
fn back_chars(text: &str, from: usize, n: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(from)
}

/// Byte offset `n` characters after `from`, or the end of the text.
fn forward_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(idx, _)| from + idx)
        .unwrap_or(text.len())
}

/// Build an excerpt of `text` around the first token accepted by `is_match`.
///
/// Falls back to the start of `text` when nothing matches. Whitespace runs are
/// collapsed and `...` marks text cut off at either end.
pub fn make_snippet<F>(text: &str, is_match: F, context_chars: usize) -> String
where
    F: Fn(&str) -> bool,
{
    if text.trim().is_empty() {
        return String::new();
    }

    let (start, end) = match token_spans(text).into_iter().find(|span| is_match(&span.token)) {
        Some(span) => (
            back_chars(text, span.start, context_chars),
            forward_chars(text, span.end, context_chars),
        ),
        None => (0, forward_chars(text, 0, context_chars * 2)),
    };

    let mut snippet = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");

    if !text[..start].trim().is_empty() {
        snippet = format!("{}{}", ELLIPSIS, snippet);
    }
    if !text[end..].trim().is_empty() {
        snippet.push_str(ELLIPSIS);
    }

    if snippet.chars().count() > MAX_SNIPPET_LENGTH {
        snippet = snippet
            .chars()
            .take(MAX_SNIPPET_LENGTH - ELLIPSIS.len())
            .collect();
        snippet.push_str(ELLIPSIS);
    }

    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_contains_match() {
        let text = "This is a long text with many words to test snippet generation functionality";
        let snippet = make_snippet(text, |t| t == "snippet", 10);

        assert!(snippet.contains("snippet"));
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert!(snippet.chars().count() <= MAX_SNIPPET_LENGTH);
    }

    #[test]
    fn test_snippet_whole_text_when_short() {
        let snippet = make_snippet("A phytomer", |t| t == "phytomer", 60);
        assert_eq!(snippet, "A phytomer");
    }

    #[test]
    fn test_snippet_falls_back_to_start() {
        let text = "Documentation for XPalm. It models oil palm growth over many years.";
        let snippet = make_snippet(text, |_| false, 10);

        assert!(snippet.starts_with("Documentation"));
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_snippet_collapses_whitespace() {
        let text = "Female(state)\n\nA female inflorescence\n\n\n\n";
        let snippet = make_snippet(text, |t| t == "inflorescence", 60);
        assert_eq!(snippet, "Female(state) A female inflorescence");
    }

    #[test]
    fn test_snippet_empty_text() {
        assert_eq!(make_snippet("", |_| true, 60), "");
        assert_eq!(make_snippet("\n\n", |_| true, 60), "");
    }

    #[test]
    fn test_snippet_multibyte_boundaries() {
        let text = "ééééééééééééé Bäume wachsen ééééééééééééé";
        let snippet = make_snippet(text, |t| t == "bäume", 3);
        assert!(snippet.contains("Bäume"));
    }

    #[test]
    fn test_snippet_length_capped() {
        let text = "word ".repeat(200);
        let snippet = make_snippet(&text, |t| t == "word", 500);
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_LENGTH);
        assert!(snippet.ends_with("..."));
    }
}
