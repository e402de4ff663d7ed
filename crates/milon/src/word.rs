//! Word entry data model and collection persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MilonError, Result};

/// Sentinel marking a translation that could not be obtained.
pub const TRANSLATION_PLACEHOLDER: &str = "[Translation needed]";

/// Sentinel written when every retry for an item failed.
pub const FAILED_PLACEHOLDER: &str = "[Failed to translate]";

/// Literal substrings that mark a template sentence rather than a real one.
pub const SENTENCE_PLACEHOLDER_MARKERS: [&str; 4] = [
    "Example sentence for",
    "Another example",
    "Example sentence with",
    TRANSLATION_PLACEHOLDER,
];

/// Maximum number of translations kept per entry.
pub const MAX_TRANSLATIONS: usize = 5;

/// Maximum number of example sentences kept per entry.
pub const MAX_SENTENCES: usize = 2;

/// Supported languages, as two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    He,
}

impl Language {
    /// Two-letter code used in API requests.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::He => "he",
        }
    }

    /// BCP-47 locale used by speech synthesis endpoints.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::He => "he-IL",
        }
    }
}

/// CEFR proficiency level for a vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Unknown,
}

impl CefrLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
            CefrLevel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CefrLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            "UNKNOWN" => Ok(CefrLevel::Unknown),
            _ => Err(()),
        }
    }
}

/// A single vocabulary item - the unit of work for the whole pipeline.
///
/// Serialized with camelCase field names; that is the on-disk format the
/// surrounding application reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Stable unique identifier, immutable once assigned.
    pub id: String,

    /// The headword in its source-language surface form.
    pub term: String,

    pub source_language: Language,
    pub target_language: Language,

    /// Target-language translations, relevance-ordered, at most
    /// [`MAX_TRANSLATIONS`], no normalized duplicates.
    #[serde(default)]
    pub translations: Vec<String>,

    /// Source-language example sentences, at most [`MAX_SENTENCES`].
    #[serde(default)]
    pub example_sentences: Vec<String>,

    /// Positionally aligned with `example_sentences`; empty strings mark
    /// per-sentence translation failures.
    #[serde(default)]
    pub translated_sentences: Vec<String>,

    #[serde(default = "default_level")]
    pub proficiency_level: CefrLevel,

    /// User-set mastery flag.
    #[serde(default)]
    pub is_known: bool,
}

fn default_level() -> CefrLevel {
    CefrLevel::Unknown
}

impl WordEntry {
    /// Create an empty entry for a term.
    pub fn new(id: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            source_language: Language::En,
            target_language: Language::He,
            translations: Vec::new(),
            example_sentences: Vec::new(),
            translated_sentences: Vec::new(),
            proficiency_level: CefrLevel::Unknown,
            is_known: false,
        }
    }

    pub fn with_level(mut self, level: CefrLevel) -> Self {
        self.proficiency_level = level;
        self
    }
}

/// Normalize a term for duplicate comparison.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Validate a headword at the application boundary.
///
/// Rejected terms never reach the pipeline.
pub fn validate_term(term: &str) -> Result<()> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(MilonError::Validation("term cannot be empty".to_string()));
    }
    if trimmed.chars().count() > 100 {
        return Err(MilonError::Validation(
            "term is too long (max 100 characters)".to_string(),
        ));
    }
    Ok(())
}

/// The persisted word collection: a JSON document `{ "words": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCollection {
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

impl WordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if a normalized-equal term already exists for the same
    /// source language, excluding `exclude_id` when given.
    pub fn has_duplicate(
        &self,
        term: &str,
        language: Language,
        exclude_id: Option<&str>,
    ) -> bool {
        let normalized = normalize_term(term);
        self.words.iter().any(|w| {
            normalize_term(&w.term) == normalized
                && w.source_language == language
                && exclude_id != Some(w.id.as_str())
        })
    }

    /// Add an entry, enforcing the boundary validation rules.
    pub fn add(&mut self, entry: WordEntry) -> Result<()> {
        validate_term(&entry.term)?;
        if self.has_duplicate(&entry.term, entry.source_language, None) {
            return Err(MilonError::Validation(format!(
                "duplicate term '{}' for language '{}'",
                entry.term.trim(),
                entry.source_language.code()
            )));
        }
        self.words.push(entry);
        Ok(())
    }

    /// Load a collection from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            MilonError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let collection: WordCollection = serde_json::from_reader(reader).map_err(|e| {
            MilonError::Persistence(format!(
                "Failed to parse word collection '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(collection)
    }

    /// Save the collection to a JSON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    MilonError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            MilonError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            MilonError::Persistence(format!("Failed to serialize word collection: {}", e))
        })?;

        Ok(())
    }
}
