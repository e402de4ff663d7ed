//! Dataset selectors and the refill predicates behind them.

use std::fmt;
use std::str::FromStr;

use crate::error::MilonError;
use crate::text::is_placeholder;
use crate::word::{CefrLevel, WordEntry, FAILED_PLACEHOLDER, TRANSLATION_PLACEHOLDER};

/// Which slice of the collection a batch run operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Entries tagged with one CEFR level.
    Level(CefrLevel),
    /// Entries whose content still carries placeholder text.
    Placeholders,
    /// Every entry.
    All,
}

impl Category {
    pub fn matches(&self, entry: &WordEntry) -> bool {
        match self {
            Category::Level(level) => entry.proficiency_level == *level,
            Category::Placeholders => needs_processing(entry),
            Category::All => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Level(level) => write!(f, "{}", level.label().to_lowercase()),
            Category::Placeholders => write!(f, "placeholders"),
            Category::All => write!(f, "all"),
        }
    }
}

impl FromStr for Category {
    type Err = MilonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "placeholders" => Ok(Category::Placeholders),
            "all" => Ok(Category::All),
            other => other
                .parse::<CefrLevel>()
                .map(Category::Level)
                .map_err(|_| MilonError::UnknownCategory(s.to_string())),
        }
    }
}

/// True when the translation list is empty or tainted by placeholder text.
pub fn has_placeholder_translations(entry: &WordEntry) -> bool {
    entry.translations.is_empty()
        || entry
            .translations
            .iter()
            .any(|t| t.contains(TRANSLATION_PLACEHOLDER) || t.contains(FAILED_PLACEHOLDER))
}

/// True when the example sentences are empty or any is a known placeholder.
pub fn has_placeholder_sentences(entry: &WordEntry) -> bool {
    entry.example_sentences.is_empty()
        || entry.example_sentences.iter().any(|s| is_placeholder(s))
}

/// True when the translated sentences are absent, misaligned with the
/// examples, or carry placeholder text.
pub fn has_placeholder_translated_sentences(entry: &WordEntry) -> bool {
    entry.translated_sentences.is_empty()
        || entry.translated_sentences.len() != entry.example_sentences.len()
        || entry
            .translated_sentences
            .iter()
            .any(|s| s.contains(TRANSLATION_PLACEHOLDER) || s.contains(FAILED_PLACEHOLDER))
}

/// True when any field of the entry still needs a refill pass.
pub fn needs_processing(entry: &WordEntry) -> bool {
    has_placeholder_translations(entry)
        || has_placeholder_sentences(entry)
        || has_placeholder_translated_sentences(entry)
}
