//! External-service adapters and their selection.
//!
//! Every network adapter follows the same contract: construction can fail
//! (operator misconfiguration is a hard error), but fetching never does.
//! A provider that is down, rate-limited, or returning garbage yields an
//! empty result and the pipeline falls back to placeholders.

pub mod level;
pub mod retry;
pub mod selector;
pub mod sentences;
pub mod speech;
pub mod storage;
pub mod translate;

pub use level::{LevelClassifier, DEFAULT_DATASET_PATH};
pub use retry::{FetchError, RetryPolicy};
pub use selector::{
    select_sentence_generator, select_speech, select_translator, ProviderSettings,
    SentenceProvider, Services, SpeechProvider, TranslationProvider,
};
pub use sentences::{FreeDictionary, OfflineSentences, SentenceGenerator, Wordnik};
pub use speech::{DeviceSpeech, GoogleSpeech, SpeechSynthesizer};
pub use storage::{FileStore, MemoryStore, WordStore};
pub use translate::{
    GoogleTranslate, LibreTranslate, MyMemory, OfflineTranslator, TranslationResult, Translator,
};
