//! Provider selection and service configuration.
//!
//! Selection is a pure decision: given the settings, return the concrete
//! adapter. The offline flag overrides everything - offline mode must
//! never hand out an adapter that performs a network call.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{MilonError, Result};

use super::level::{LevelClassifier, DEFAULT_DATASET_PATH};
use super::sentences::{FreeDictionary, OfflineSentences, SentenceGenerator, Wordnik};
use super::speech::{DeviceSpeech, GoogleSpeech, SpeechSynthesizer};
use super::storage::FileStore;
use super::translate::{GoogleTranslate, LibreTranslate, MyMemory, OfflineTranslator, Translator};

/// Translation provider names. Default: Google.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    #[default]
    Google,
    MyMemory,
    LibreTranslate,
}

impl TranslationProvider {
    /// Parse a provider name; unrecognized names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "mymemory" => Self::MyMemory,
            "libretranslate" => Self::LibreTranslate,
            _ => Self::Google,
        }
    }
}

/// Sentence provider names. Default: Free Dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceProvider {
    #[default]
    FreeDictionary,
    Wordnik,
}

impl SentenceProvider {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "wordnik" => Self::Wordnik,
            _ => Self::FreeDictionary,
        }
    }
}

/// Speech provider names. Default: on-device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    #[default]
    Device,
    Google,
}

impl SpeechProvider {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "google" => Self::Google,
            _ => Self::Device,
        }
    }
}

/// Declarative provider configuration, loadable from a JSON settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    pub translation: TranslationProvider,
    pub sentences: SentenceProvider,
    pub speech: SpeechProvider,
    /// When set, every capability gets its offline adapter.
    pub offline: bool,
    pub wordnik_api_key: Option<String>,
    pub google_tts_api_key: Option<String>,
}

impl ProviderSettings {
    pub fn offline_mode() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MilonError::Config(format!(
                "Failed to open settings '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            MilonError::Config(format!(
                "Failed to parse settings '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Select the translator for the given settings.
pub fn select_translator(settings: &ProviderSettings) -> Result<Box<dyn Translator>> {
    if settings.offline {
        return Ok(Box::new(OfflineTranslator));
    }
    Ok(match settings.translation {
        TranslationProvider::Google => Box::new(GoogleTranslate::new()?),
        TranslationProvider::MyMemory => Box::new(MyMemory::new()?),
        TranslationProvider::LibreTranslate => Box::new(LibreTranslate::new()?),
    })
}

/// Select the sentence generator for the given settings.
pub fn select_sentence_generator(
    settings: &ProviderSettings,
) -> Result<Box<dyn SentenceGenerator>> {
    if settings.offline {
        return Ok(Box::new(OfflineSentences));
    }
    Ok(match settings.sentences {
        SentenceProvider::FreeDictionary => Box::new(FreeDictionary::new()?),
        SentenceProvider::Wordnik => Box::new(Wordnik::new(
            settings.wordnik_api_key.clone().unwrap_or_default(),
        )?),
    })
}

/// Select the speech synthesizer for the given settings.
///
/// Offline mode always yields the on-device adapter, never the network
/// TTS adapter.
pub fn select_speech(settings: &ProviderSettings) -> Result<Box<dyn SpeechSynthesizer>> {
    if settings.offline {
        return Ok(Box::new(DeviceSpeech::new()));
    }
    Ok(match settings.speech {
        SpeechProvider::Device => Box::new(DeviceSpeech::new()),
        SpeechProvider::Google => Box::new(GoogleSpeech::new(
            settings.google_tts_api_key.clone().unwrap_or_default(),
        )?),
    })
}

/// Process-lifetime service bundle.
///
/// Adapters are selected fresh from the settings, but the level classifier
/// has no provider axis and no offline variant: one dataset-backed
/// instance is constructed here and shared for the life of the process.
pub struct Services {
    settings: ProviderSettings,
    level: Arc<LevelClassifier>,
    store_root: PathBuf,
}

impl Services {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            level: Arc::new(LevelClassifier::new(DEFAULT_DATASET_PATH)),
            store_root: PathBuf::from("data"),
        }
    }

    /// Use a different CEFR dataset location.
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.level = Arc::new(LevelClassifier::new(path.into()));
        self
    }

    /// Use a different storage root for partitioned collections.
    pub fn with_store_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.store_root = root.into();
        self
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn translator(&self) -> Result<Box<dyn Translator>> {
        select_translator(&self.settings)
    }

    pub fn sentence_generator(&self) -> Result<Box<dyn SentenceGenerator>> {
        select_sentence_generator(&self.settings)
    }

    pub fn speech(&self) -> Result<Box<dyn SpeechSynthesizer>> {
        select_speech(&self.settings)
    }

    /// The shared, process-lifetime level classifier.
    pub fn level_classifier(&self) -> Arc<LevelClassifier> {
        Arc::clone(&self.level)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_with_fallback() {
        assert_eq!(TranslationProvider::from_name("mymemory"), TranslationProvider::MyMemory);
        assert_eq!(TranslationProvider::from_name("bogus"), TranslationProvider::Google);
        assert_eq!(SentenceProvider::from_name("WORDNIK"), SentenceProvider::Wordnik);
        assert_eq!(SentenceProvider::from_name(""), SentenceProvider::FreeDictionary);
        assert_eq!(SpeechProvider::from_name("google"), SpeechProvider::Google);
        assert_eq!(SpeechProvider::from_name("browser"), SpeechProvider::Device);
    }

    #[test]
    fn test_online_selection_dispatches_on_name() {
        let settings = ProviderSettings {
            translation: TranslationProvider::MyMemory,
            sentences: SentenceProvider::FreeDictionary,
            speech: SpeechProvider::Device,
            ..Default::default()
        };
        assert_eq!(select_translator(&settings).unwrap().name(), "mymemory");
        assert_eq!(
            select_sentence_generator(&settings).unwrap().name(),
            "freedictionary"
        );
        assert_eq!(select_speech(&settings).unwrap().name(), "device");
    }

    #[test]
    fn test_offline_overrides_every_provider_choice() {
        // Whatever providers are requested, offline mode must never return
        // an adapter that performs a network call.
        for translation in [
            TranslationProvider::Google,
            TranslationProvider::MyMemory,
            TranslationProvider::LibreTranslate,
        ] {
            for sentences in [SentenceProvider::FreeDictionary, SentenceProvider::Wordnik] {
                for speech in [SpeechProvider::Device, SpeechProvider::Google] {
                    let settings = ProviderSettings {
                        translation,
                        sentences,
                        speech,
                        offline: true,
                        wordnik_api_key: Some("key".to_string()),
                        google_tts_api_key: Some("key".to_string()),
                    };
                    assert_eq!(select_translator(&settings).unwrap().name(), "offline");
                    assert_eq!(
                        select_sentence_generator(&settings).unwrap().name(),
                        "offline"
                    );
                    assert_eq!(select_speech(&settings).unwrap().name(), "device");
                }
            }
        }
    }

    #[test]
    fn test_settings_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"translation":"mymemory","speech":"google","offline":false,"googleTtsApiKey":"k"}"#,
        )
        .unwrap();

        let settings = ProviderSettings::load(&path).unwrap();
        assert_eq!(settings.translation, TranslationProvider::MyMemory);
        assert_eq!(settings.speech, SpeechProvider::Google);
        assert_eq!(settings.sentences, SentenceProvider::FreeDictionary);
        assert_eq!(settings.google_tts_api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_level_classifier_is_shared() {
        let services = Services::new(ProviderSettings::default());
        let a = services.level_classifier();
        let b = services.level_classifier();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
