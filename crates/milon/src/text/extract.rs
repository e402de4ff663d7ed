//! Hebrew-script extraction from nested API payloads.
//!
//! Translation endpoints return deeply nested JSON arrays that mix Hebrew
//! with English glosses and punctuation. These helpers pull out only the
//! Hebrew runs, preserving encounter order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Cap on distinct extracted strings; recursion stops early once reached.
pub const MAX_EXTRACTED: usize = 5;

/// Contiguous runs of Hebrew-block code points (U+0590..U+05FF).
static HEBREW_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0590}-\u{05FF}]+").expect("valid Hebrew run regex"));

/// True if the text contains at least one Hebrew-block character.
pub fn contains_hebrew(text: &str) -> bool {
    HEBREW_RUN.is_match(text)
}

/// Extract the Hebrew runs of a string, joined with a single space.
///
/// Interleaved non-Hebrew text is discarded. Returns `None` when the
/// string holds no Hebrew or trims to nothing.
pub fn hebrew_runs(text: &str) -> Option<String> {
    let joined = HEBREW_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Walk an arbitrarily nested payload of strings and arrays, collecting a
/// flat, deduplicated, order-preserving list of Hebrew substrings.
///
/// At most [`MAX_EXTRACTED`] distinct results are returned; first
/// occurrence wins on duplicates. Non-string, non-array nodes are ignored.
pub fn extract_hebrew(payload: &Value) -> Vec<String> {
    let mut results = Vec::new();
    collect(payload, &mut results);
    results
}

/// Reduce raw translation strings to their Hebrew content.
///
/// Each input is stripped to its Hebrew runs; inputs with no Hebrew are
/// dropped. Duplicates are removed (first occurrence wins) and at most
/// [`MAX_EXTRACTED`] entries are kept.
pub fn clean_translations<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for item in raw {
        if cleaned.len() >= MAX_EXTRACTED {
            break;
        }
        if let Some(text) = hebrew_runs(item.as_ref()) {
            if !cleaned.contains(&text) {
                cleaned.push(text);
            }
        }
    }
    cleaned
}

fn collect(node: &Value, results: &mut Vec<String>) {
    if results.len() >= MAX_EXTRACTED {
        return;
    }
    match node {
        Value::String(s) => {
            if let Some(text) = hebrew_runs(s) {
                if !results.contains(&text) {
                    results.push(text);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if results.len() >= MAX_EXTRACTED {
                    return;
                }
                collect(item, results);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contains_hebrew() {
        assert!(contains_hebrew("לשחק"));
        assert!(contains_hebrew("play לשחק play"));
        assert!(!contains_hebrew("play"));
        assert!(!contains_hebrew(""));
    }

    #[test]
    fn test_hebrew_runs_strips_interleaved_latin() {
        assert_eq!(hebrew_runs("לשחק (to play) לנגן").as_deref(), Some("לשחק לנגן"));
        assert_eq!(hebrew_runs("  לרוץ  ").as_deref(), Some("לרוץ"));
        assert_eq!(hebrew_runs("nothing here"), None);
    }

    #[test]
    fn test_extract_from_nested_arrays() {
        let payload = json!([
            [["לשחק", "play", null]],
            ["noise", [["לנגן - to play an instrument"]]],
        ]);
        assert_eq!(extract_hebrew(&payload), vec!["לשחק", "לנגן"]);
    }

    #[test]
    fn test_extract_dedup_first_wins() {
        let payload = json!(["לשחק", ["  לשחק  "], "לנגן"]);
        assert_eq!(extract_hebrew(&payload), vec!["לשחק", "לנגן"]);
    }

    #[test]
    fn test_extract_stops_at_cap() {
        let payload = json!(["א", "ב", "ג", "ד", "ה", "ו", "ז"]);
        let extracted = extract_hebrew(&payload);
        assert_eq!(extracted.len(), MAX_EXTRACTED);
        assert_eq!(extracted[0], "א");
    }

    #[test]
    fn test_clean_translations_strips_and_dedups() {
        let raw = vec![
            "לשחק (to play)".to_string(),
            "to play".to_string(),
            "  לשחק  ".to_string(),
            "לנגן".to_string(),
        ];
        assert_eq!(clean_translations(&raw), vec!["לשחק", "לנגן"]);
    }

    #[test]
    fn test_extract_ignores_non_strings() {
        let payload = json!([42, true, {"he": "לשחק"}, null]);
        // Object values are not traversed; payloads of interest are arrays.
        assert!(extract_hebrew(&payload).is_empty());
    }
}
