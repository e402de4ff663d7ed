//! Dataset quality audit.
//!
//! Pure scan over a word collection: no network, no mutation. Each entry
//! is classified into zero or more issue categories, and entries are
//! counted once in the issues/clean split no matter how many categories
//! they fall into.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{MilonError, Result};
use crate::text::is_placeholder;
use crate::word::{
    CefrLevel, WordCollection, WordEntry, FAILED_PLACEHOLDER, TRANSLATION_PLACEHOLDER,
};

pub const MISSING_TRANSLATIONS: &str = "missingTranslations";
pub const PLACEHOLDER_TRANSLATIONS: &str = "placeholderTranslations";
pub const MISSING_SENTENCES: &str = "missingSentences";
pub const PLACEHOLDER_SENTENCES: &str = "placeholderSentences";
pub const MISSING_TRANSLATED_SENTENCES: &str = "missingTranslatedSentences";
pub const PLACEHOLDER_TRANSLATED_SENTENCES: &str = "placeholderTranslatedSentences";
pub const MISSING_LEVEL: &str = "missingLevel";

/// All issue categories, in report order.
pub const ISSUE_CATEGORIES: [&str; 7] = [
    MISSING_TRANSLATIONS,
    PLACEHOLDER_TRANSLATIONS,
    MISSING_SENTENCES,
    PLACEHOLDER_SENTENCES,
    MISSING_TRANSLATED_SENTENCES,
    PLACEHOLDER_TRANSLATED_SENTENCES,
    MISSING_LEVEL,
];

/// One affected entry, as listed in the report details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRef {
    pub id: String,
    pub term: String,
}

/// Aggregate counts for one verification pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub total_words: usize,
    /// Distinct entries with at least one issue.
    pub words_with_issues: usize,
    pub words_without_issues: usize,
    pub missing_translations: usize,
    pub placeholder_translations: usize,
    pub missing_sentences: usize,
    pub placeholder_sentences: usize,
    pub missing_translated_sentences: usize,
    pub placeholder_translated_sentences: usize,
    pub missing_level: usize,
}

/// Full verification report, serialized next to the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub timestamp: DateTime<Utc>,
    pub summary: VerificationSummary,
    /// Category name to affected entries; every category is present, even
    /// when empty.
    pub details: IndexMap<String, Vec<IssueRef>>,
}

impl VerificationReport {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| MilonError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Issue categories a single entry falls into.
fn classify(entry: &WordEntry) -> Vec<&'static str> {
    let mut issues = Vec::new();

    if entry.translations.is_empty() {
        issues.push(MISSING_TRANSLATIONS);
    } else if entry
        .translations
        .iter()
        .any(|t| t.contains(TRANSLATION_PLACEHOLDER) || t.contains(FAILED_PLACEHOLDER))
    {
        issues.push(PLACEHOLDER_TRANSLATIONS);
    }

    if entry.example_sentences.is_empty() {
        issues.push(MISSING_SENTENCES);
    } else if entry.example_sentences.iter().any(|s| is_placeholder(s)) {
        issues.push(PLACEHOLDER_SENTENCES);
    }

    if entry.translated_sentences.is_empty() {
        issues.push(MISSING_TRANSLATED_SENTENCES);
    } else if entry.translated_sentences.iter().any(|s| {
        s.trim().is_empty()
            || s.contains(TRANSLATION_PLACEHOLDER)
            || s.contains(FAILED_PLACEHOLDER)
    }) {
        issues.push(PLACEHOLDER_TRANSLATED_SENTENCES);
    }

    if entry.proficiency_level == CefrLevel::Unknown {
        issues.push(MISSING_LEVEL);
    }

    issues
}

/// Scan a collection and build the report.
pub fn verify(collection: &WordCollection) -> VerificationReport {
    let mut details: IndexMap<String, Vec<IssueRef>> = ISSUE_CATEGORIES
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    let mut words_with_issues = 0usize;
    for entry in &collection.words {
        let issues = classify(entry);
        if !issues.is_empty() {
            words_with_issues += 1;
        }
        for issue in issues {
            details
                .get_mut(issue)
                .expect("category pre-seeded")
                .push(IssueRef {
                    id: entry.id.clone(),
                    term: entry.term.clone(),
                });
        }
    }

    let count = |name: &str| details[name].len();
    let summary = VerificationSummary {
        total_words: collection.len(),
        words_with_issues,
        words_without_issues: collection.len() - words_with_issues,
        missing_translations: count(MISSING_TRANSLATIONS),
        placeholder_translations: count(PLACEHOLDER_TRANSLATIONS),
        missing_sentences: count(MISSING_SENTENCES),
        placeholder_sentences: count(PLACEHOLDER_SENTENCES),
        missing_translated_sentences: count(MISSING_TRANSLATED_SENTENCES),
        placeholder_translated_sentences: count(PLACEHOLDER_TRANSLATED_SENTENCES),
        missing_level: count(MISSING_LEVEL),
    };

    VerificationReport {
        timestamp: Utc::now(),
        summary,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_entry(id: &str, term: &str) -> WordEntry {
        let mut entry = WordEntry::new(id, term).with_level(CefrLevel::B1);
        entry.translations = vec!["מילה".to_string()];
        entry.example_sentences = vec!["A sentence using it.".to_string()];
        entry.translated_sentences = vec!["משפט שמשתמש בה.".to_string()];
        entry
    }

    #[test]
    fn test_clean_collection_reports_no_issues() {
        let mut collection = WordCollection::new();
        collection.add(complete_entry("w1", "word")).unwrap();

        let report = verify(&collection);
        assert_eq!(report.summary.words_with_issues, 0);
        assert_eq!(report.summary.words_without_issues, 1);
        assert!(report.details.values().all(|v| v.is_empty()));
        assert_eq!(report.details.len(), ISSUE_CATEGORIES.len());
    }

    #[test]
    fn test_placeholder_translation_is_not_missing() {
        let mut entry = complete_entry("w1", "word");
        entry.translations = vec![TRANSLATION_PLACEHOLDER.to_string()];
        let mut collection = WordCollection::new();
        collection.add(entry).unwrap();

        let report = verify(&collection);
        assert_eq!(report.summary.placeholder_translations, 1);
        assert_eq!(report.summary.missing_translations, 0);
        assert_eq!(
            report.details[PLACEHOLDER_TRANSLATIONS],
            vec![IssueRef {
                id: "w1".to_string(),
                term: "word".to_string()
            }]
        );
    }

    #[test]
    fn test_multi_issue_entry_counted_once() {
        let mut entry = WordEntry::new("w1", "word");
        entry.translations.clear();
        let mut collection = WordCollection::new();
        collection.add(entry).unwrap();
        collection.add(complete_entry("w2", "other")).unwrap();

        let report = verify(&collection);
        // w1 misses translations, sentences, translated sentences and level,
        // yet it is one entry with issues.
        assert_eq!(report.summary.words_with_issues, 1);
        assert_eq!(report.summary.words_without_issues, 1);
        assert_eq!(report.summary.missing_translations, 1);
        assert_eq!(report.summary.missing_sentences, 1);
        assert_eq!(report.summary.missing_translated_sentences, 1);
        assert_eq!(report.summary.missing_level, 1);
    }

    #[test]
    fn test_empty_translated_sentence_is_placeholder_tainted() {
        let mut entry = complete_entry("w1", "word");
        entry.translated_sentences = vec!["משפט".to_string(), String::new()];
        let mut collection = WordCollection::new();
        collection.add(entry).unwrap();

        let report = verify(&collection);
        assert_eq!(report.summary.placeholder_translated_sentences, 1);
        assert_eq!(report.summary.missing_translated_sentences, 0);
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.report.json");

        let mut collection = WordCollection::new();
        collection.add(complete_entry("w1", "word")).unwrap();
        verify(&collection).save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert!(raw.get("timestamp").is_some());
        assert_eq!(raw["summary"]["totalWords"], 1);
        assert!(raw["details"].get(MISSING_LEVEL).is_some());
    }
}
