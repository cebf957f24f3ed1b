//! Extractive summarization of search-result snippets.
//!
//! Total over all inputs: any sequence of strings maps to either a short
//! extractive summary or [`NO_SUMMARY_FALLBACK`], never an error.

/// Returned when the snippets carry no printable content. Callers can
/// compare against this constant to tell "nothing found" apart from a
/// genuinely short summary.
pub const NO_SUMMARY_FALLBACK: &str = "No concise summary found. Check links below.";

/// How many leading sentences make up a summary.
const SUMMARY_SENTENCES: usize = 3;

/// Drop empty snippets, join the rest with single spaces, and keep the
/// first three sentences of the result. Snippet order is preserved.
pub fn summarize(snippets: &[String]) -> String {
    let joined = snippets
        .iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if joined.trim().is_empty() {
        return NO_SUMMARY_FALLBACK.to_string();
    }
    split_sentences(&joined)
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on sentence boundaries: immediately after `.`, `!` or `?` when the
/// next character is whitespace. The whitespace run between sentences is
/// not part of either sentence. Text without a terminal boundary is one
/// sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(after_punct, next)) = chars.peek() else { continue };
        if !next.is_whitespace() {
            continue;
        }
        sentences.push(&text[start..after_punct]);
        start = after_punct;
        while let Some(&(i, w)) = chars.peek() {
            if !w.is_whitespace() {
                start = i;
                break;
            }
            start = i + w.len_utf8();
            chars.next();
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}
