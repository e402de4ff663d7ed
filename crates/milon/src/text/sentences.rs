//! Sentence cleanup and HTML-entity decoding.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::word::{MAX_SENTENCES, SENTENCE_PLACEHOLDER_MARKERS};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// True if the sentence matches a known template/placeholder marker.
pub fn is_placeholder(sentence: &str) -> bool {
    SENTENCE_PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| sentence.contains(marker))
}

/// The fixed fallback pair synthesized when no real sentences survive.
pub fn fallback_sentences(term: &str) -> Vec<String> {
    vec![
        format!("Example sentence with {}.", term),
        format!("Another example using {}.", term),
    ]
}

/// Drop placeholder-marked and empty candidates, capping at
/// [`MAX_SENTENCES`]. When nothing survives, return exactly the fixed
/// fallback pair for the term.
pub fn clean_sentences<S: AsRef<str>>(candidates: &[S], term: &str) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();

    for candidate in candidates {
        let trimmed = candidate.as_ref().trim();
        if trimmed.is_empty() || is_placeholder(trimmed) {
            continue;
        }
        cleaned.push(trimmed.to_string());
        if cleaned.len() >= MAX_SENTENCES {
            break;
        }
    }

    if cleaned.is_empty() {
        return fallback_sentences(term);
    }
    cleaned
}

/// Decode the HTML entities translation endpoints leave in text, then
/// collapse runs of whitespace to single spaces.
pub fn decode_html_entities(text: &str) -> String {
    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder("Example sentence for bat."));
        assert!(is_placeholder("Another example using bat."));
        assert!(is_placeholder("[Translation needed]"));
        assert!(!is_placeholder("The bat flew out of the cave."));
    }

    #[test]
    fn test_clean_keeps_real_sentences() {
        let cleaned = clean_sentences(
            &["  The bat flew.  ", "Example sentence for bat.", "Bats sleep all day."],
            "bat",
        );
        assert_eq!(cleaned, vec!["The bat flew.", "Bats sleep all day."]);
    }

    #[test]
    fn test_clean_all_placeholders_yields_fallback_pair() {
        let cleaned = clean_sentences(&["Example sentence for bat.", "[Translation needed]"], "bat");
        assert_eq!(
            cleaned,
            vec![
                "Example sentence with bat.".to_string(),
                "Another example using bat.".to_string(),
            ]
        );
    }

    #[test]
    fn test_clean_empty_input_yields_fallback_pair() {
        let cleaned = clean_sentences::<&str>(&[], "drought");
        assert_eq!(cleaned, fallback_sentences("drought"));
    }

    #[test]
    fn test_clean_caps_at_two() {
        let cleaned = clean_sentences(&["one.", "two.", "three."], "x");
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_decode_html_entities() {
        assert_eq!(decode_html_entities("rock &amp; roll"), "rock & roll");
        assert_eq!(decode_html_entities("it&#39;s   fine\n"), "it's fine");
    }
}
