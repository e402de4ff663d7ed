//! Translation provider adapters.
//!
//! Every adapter honors the same fail-soft contract: on any network or
//! payload failure the result degrades to whatever the curated table can
//! supply (possibly nothing), and the failure is logged rather than
//! propagated. Batch processing can always proceed to the next item.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::curated::common_translations;
use crate::error::{MilonError, Result};
use crate::text::decode_html_entities;
use crate::word::{Language, MAX_TRANSLATIONS};

use super::retry::{FetchError, RetryPolicy};

/// Confidence for curated-table matches.
pub const CONFIDENCE_CURATED: u8 = 100;
/// Confidence for a primary phrase-level API translation.
pub const CONFIDENCE_PHRASE: u8 = 95;
/// Confidence for MyMemory's main translation.
pub const CONFIDENCE_MAIN: u8 = 90;
/// Confidence for secondary dictionary-derived entries.
pub const CONFIDENCE_DICTIONARY: u8 = 85;
/// Default confidence when the upstream match carries no quality score.
pub const CONFIDENCE_DEFAULT: u8 = 50;

const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";
const LIBRETRANSLATE_URL: &str = "https://libretranslate.com/translate";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Translations with per-entry confidence, relevance-ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationResult {
    pub translations: Vec<String>,
    /// Aligned with `translations`.
    pub confidence: Vec<u8>,
}

impl TranslationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Seed a result with curated-table matches at top confidence.
    pub fn from_curated(term: &str, source: Language, target: Language) -> Self {
        let mut result = Self::empty();
        for trans in common_translations(term, source, target) {
            result.push_unique(trans, CONFIDENCE_CURATED);
        }
        result
    }

    /// Append a translation unless a normalized-equal one is already
    /// present; first occurrence wins. Capped at [`MAX_TRANSLATIONS`].
    pub fn push_unique(&mut self, text: &str, confidence: u8) {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.translations.len() >= MAX_TRANSLATIONS {
            return;
        }
        let normalized = trimmed.to_lowercase();
        if self
            .translations
            .iter()
            .any(|t| t.to_lowercase() == normalized)
        {
            return;
        }
        self.translations.push(trimmed.to_string());
        self.confidence.push(confidence);
    }
}

/// Trait for translation providers.
///
/// Implementations must be thread-safe (Send + Sync) and must never
/// return an error: failures degrade to an empty result.
pub trait Translator: Send + Sync {
    /// Translate a term (or a full sentence) between languages.
    fn translate(&self, term: &str, source: Language, target: Language) -> TranslationResult;

    /// Provider name, for logging and selection checks.
    fn name(&self) -> &str;
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| MilonError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Classify a blocking response for the retry policy, yielding its JSON
/// payload on success.
fn json_payload(response: reqwest::blocking::Response) -> std::result::Result<Value, FetchError> {
    let status = response.status();
    if status.as_u16() == 429 {
        return Err(FetchError::RateLimited);
    }
    if !status.is_success() {
        return Err(FetchError::Failed(format!("HTTP {}", status)));
    }
    response
        .json()
        .map_err(|e| FetchError::Failed(format!("malformed payload: {}", e)))
}

// ---------------------------------------------------------------------------
// Google Translate (unofficial free endpoint)
// ---------------------------------------------------------------------------

/// Translator backed by the public `translate_a/single` endpoint.
///
/// The payload is a nested array: `[0]` holds phrase-level alternatives,
/// `[1]` holds dictionary entries.
pub struct GoogleTranslate {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

impl GoogleTranslate {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: GOOGLE_TRANSLATE_URL.to_string(),
            policy: RetryPolicy::default(),
        })
    }

    /// Point at a different endpoint (tests, self-hosted mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn fetch(&self, term: &str, source: Language, target: Language) -> Option<Value> {
        self.policy.run(&format!("translate '{}'", term), || {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("client", "gtx"),
                    ("sl", source.code()),
                    ("tl", target.code()),
                    ("q", term),
                    ("dt", "t"),
                    ("dt", "bd"),
                ])
                .send()
                .map_err(|e| FetchError::Failed(e.to_string()))?;
            json_payload(response)
        })
    }
}

impl Translator for GoogleTranslate {
    fn translate(&self, term: &str, source: Language, target: Language) -> TranslationResult {
        // Curated matches first; live results supplement them.
        let mut result = TranslationResult::from_curated(term, source, target);

        match self.fetch(term, source, target) {
            Some(payload) => parse_google_payload(&payload, &mut result),
            None => {
                tracing::warn!("google translate failed for '{}', using curated fallback", term)
            }
        }

        result
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Fold a `translate_a/single` payload into a result.
///
/// `[0]` items carry the phrase translation at index 0; `[1]` entries hold
/// dictionary alternatives under `entry[].word` (first 3 kept).
pub(crate) fn parse_google_payload(payload: &Value, result: &mut TranslationResult) {
    if let Some(phrases) = payload.get(0).and_then(Value::as_array) {
        for item in phrases {
            if let Some(text) = item.get(0).and_then(Value::as_str) {
                result.push_unique(text, CONFIDENCE_PHRASE);
            }
        }
    }

    if let Some(entries) = payload.get(1).and_then(Value::as_array) {
        for entry in entries {
            let Some(words) = entry.get("entry").and_then(Value::as_array) else {
                continue;
            };
            for item in words.iter().take(3) {
                if let Some(text) = item.get("word").and_then(Value::as_str) {
                    result.push_unique(text, CONFIDENCE_DICTIONARY);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MyMemory
// ---------------------------------------------------------------------------

/// Translator backed by the MyMemory translation memory API.
pub struct MyMemory {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
    #[serde(default)]
    matches: Vec<MyMemoryMatch>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryMatch {
    translation: Option<String>,
    /// Sometimes a number, sometimes a numeric string.
    #[serde(default)]
    quality: Value,
}

impl MyMemoryMatch {
    fn quality_score(&self) -> u8 {
        match &self.quality {
            Value::Number(n) => n.as_f64().map(|q| q.clamp(0.0, 100.0) as u8),
            Value::String(s) => s.parse::<f64>().ok().map(|q| q.clamp(0.0, 100.0) as u8),
            _ => None,
        }
        .filter(|&q| q > 0)
        .unwrap_or(CONFIDENCE_DEFAULT)
    }
}

impl MyMemory {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: MYMEMORY_URL.to_string(),
            policy: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn fetch(&self, term: &str, source: Language, target: Language) -> Option<MyMemoryResponse> {
        let langpair = format!("{}|{}", source.code(), target.code());
        self.policy.run(&format!("mymemory '{}'", term), || {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[("q", term), ("langpair", &langpair)])
                .send()
                .map_err(|e| FetchError::Failed(e.to_string()))?;
            let payload = json_payload(response)?;
            serde_json::from_value(payload)
                .map_err(|e| FetchError::Failed(format!("malformed payload: {}", e)))
        })
    }
}

impl Translator for MyMemory {
    fn translate(&self, term: &str, source: Language, target: Language) -> TranslationResult {
        let mut result = TranslationResult::from_curated(term, source, target);

        match self.fetch(term, source, target) {
            Some(parsed) => fold_mymemory(parsed, &mut result),
            None => tracing::warn!("mymemory failed for '{}', using curated fallback", term),
        }

        result
    }

    fn name(&self) -> &str {
        "mymemory"
    }
}

fn fold_mymemory(parsed: MyMemoryResponse, result: &mut TranslationResult) {
    if let Some(text) = parsed.response_data.and_then(|d| d.translated_text) {
        result.push_unique(&decode_html_entities(&text), CONFIDENCE_MAIN);
    }

    // Best matches first, capped at 3.
    let mut matches = parsed.matches;
    matches.sort_by(|a, b| b.quality_score().cmp(&a.quality_score()));
    for entry in matches.iter().take(3) {
        if let Some(text) = &entry.translation {
            result.push_unique(&decode_html_entities(text), entry.quality_score());
        }
    }
}

// ---------------------------------------------------------------------------
// LibreTranslate
// ---------------------------------------------------------------------------

/// Translator backed by a LibreTranslate instance.
pub struct LibreTranslate {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreTranslate {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: LIBRETRANSLATE_URL.to_string(),
            policy: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Translator for LibreTranslate {
    fn translate(&self, term: &str, source: Language, target: Language) -> TranslationResult {
        let mut result = TranslationResult::empty();

        let fetched: Option<LibreTranslateResponse> =
            self.policy.run(&format!("libretranslate '{}'", term), || {
                let response = self
                    .client
                    .post(&self.base_url)
                    .json(&serde_json::json!({
                        "q": term,
                        "source": source.code(),
                        "target": target.code(),
                        "format": "text",
                    }))
                    .send()
                    .map_err(|e| FetchError::Failed(e.to_string()))?;
                let payload = json_payload(response)?;
                serde_json::from_value(payload)
                    .map_err(|e| FetchError::Failed(format!("malformed payload: {}", e)))
            });

        if let Some(text) = fetched.and_then(|r| r.translated_text) {
            result.push_unique(&text, CONFIDENCE_CURATED);
        }

        result
    }

    fn name(&self) -> &str {
        "libretranslate"
    }
}

// ---------------------------------------------------------------------------
// Offline stub
// ---------------------------------------------------------------------------

/// Offline translator: never touches the network, always empty.
#[derive(Debug, Default)]
pub struct OfflineTranslator;

impl Translator for OfflineTranslator {
    fn translate(&self, term: &str, _source: Language, _target: Language) -> TranslationResult {
        tracing::debug!("offline mode: translation disabled for '{}'", term);
        TranslationResult::empty()
    }

    fn name(&self) -> &str {
        "offline"
    }
}
