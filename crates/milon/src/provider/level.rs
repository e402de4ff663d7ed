//! CEFR level classifier backed by a static dataset.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::word::{normalize_term, CefrLevel};

/// Default location of the level dataset relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/cefr-words.json";

/// Classifies terms into CEFR levels from a JSON lookup table.
///
/// One instance lives for the whole process; the dataset is loaded lazily
/// on the first lookup and cached forever. Unrecognized terms classify as
/// [`CefrLevel::Unknown`], and a dataset that fails to load behaves as an
/// empty one - the classifier never errors.
pub struct LevelClassifier {
    dataset_path: PathBuf,
    dataset: OnceLock<HashMap<String, CefrLevel>>,
}

impl LevelClassifier {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            dataset: OnceLock::new(),
        }
    }

    /// Classifier over an in-memory map, for tests.
    pub fn from_map(map: HashMap<String, CefrLevel>) -> Self {
        let classifier = Self::new(DEFAULT_DATASET_PATH);
        let normalized = map
            .into_iter()
            .map(|(term, level)| (normalize_term(&term), level))
            .collect();
        classifier
            .dataset
            .set(normalized)
            .expect("fresh classifier");
        classifier
    }

    /// Look up the level for a term, loading the dataset on first use.
    pub fn level_of(&self, term: &str) -> CefrLevel {
        self.dataset()
            .get(normalize_term(term).as_str())
            .copied()
            .unwrap_or(CefrLevel::Unknown)
    }

    /// Number of terms in the loaded dataset.
    pub fn dataset_size(&self) -> usize {
        self.dataset().len()
    }

    fn dataset(&self) -> &HashMap<String, CefrLevel> {
        self.dataset.get_or_init(|| {
            match Self::load_dataset(&self.dataset_path) {
                Ok(map) => {
                    tracing::info!(
                        "CEFR dataset loaded: {} terms from {}",
                        map.len(),
                        self.dataset_path.display()
                    );
                    map
                }
                Err(e) => {
                    // Level detection degrades to Unknown; the rest of the
                    // pipeline keeps working.
                    tracing::warn!(
                        "failed to load CEFR dataset '{}': {}",
                        self.dataset_path.display(),
                        e
                    );
                    HashMap::new()
                }
            }
        })
    }

    fn load_dataset(path: &PathBuf) -> std::io::Result<HashMap<String, CefrLevel>> {
        let file = File::open(path)?;
        let raw: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(raw
            .into_iter()
            .filter_map(|(term, level)| {
                level
                    .parse::<CefrLevel>()
                    .ok()
                    .map(|l| (normalize_term(&term), l))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cefr-words.json");
        std::fs::write(&path, r#"{"absorb": "B2", "Play": "A1", "weird": "Z9"}"#).unwrap();

        let classifier = LevelClassifier::new(&path);
        assert_eq!(classifier.level_of("absorb"), CefrLevel::B2);
        assert_eq!(classifier.level_of("  PLAY "), CefrLevel::A1);
        // Unparseable levels are dropped during load.
        assert_eq!(classifier.level_of("weird"), CefrLevel::Unknown);
        assert_eq!(classifier.level_of("missing"), CefrLevel::Unknown);
        assert_eq!(classifier.dataset_size(), 2);
    }

    #[test]
    fn test_missing_dataset_degrades_to_unknown() {
        let classifier = LevelClassifier::new("/nonexistent/cefr-words.json");
        assert_eq!(classifier.level_of("absorb"), CefrLevel::Unknown);
        assert_eq!(classifier.dataset_size(), 0);
    }

    #[test]
    fn test_from_map() {
        let mut map = HashMap::new();
        map.insert("Drought".to_string(), CefrLevel::B2);
        let classifier = LevelClassifier::from_map(map);
        assert_eq!(classifier.level_of("drought"), CefrLevel::B2);
    }
}
