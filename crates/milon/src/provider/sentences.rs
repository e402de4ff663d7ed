//! Example-sentence provider adapters.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{MilonError, Result};

use super::retry::{FetchError, RetryPolicy};

const FREE_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const WORDNIK_URL: &str = "https://api.wordnik.com/v4/word.json";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest example sentence worth keeping, in characters.
const MAX_SENTENCE_LEN: usize = 150;

/// Trait for example-sentence providers.
///
/// Same fail-soft contract as [`super::Translator`]: failures degrade to
/// an empty list, never an error.
pub trait SentenceGenerator: Send + Sync {
    /// Fetch up to `max` source-language example sentences for a term.
    fn sentences(&self, term: &str, max: usize) -> Vec<String>;

    /// Provider name, for logging and selection checks.
    fn name(&self) -> &str;
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| MilonError::Config(format!("Failed to create HTTP client: {}", e)))
}

// ---------------------------------------------------------------------------
// Free Dictionary
// ---------------------------------------------------------------------------

/// Sentence provider backed by the Free Dictionary API.
///
/// Examples are harvested from `meanings[].definitions[].example`.
pub struct FreeDictionary {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    meanings: Vec<DictionaryMeaning>,
}

#[derive(Debug, Deserialize)]
struct DictionaryMeaning {
    #[serde(default)]
    definitions: Vec<DictionaryDefinition>,
}

#[derive(Debug, Deserialize)]
struct DictionaryDefinition {
    #[serde(default)]
    example: Option<String>,
}

impl FreeDictionary {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: FREE_DICTIONARY_URL.to_string(),
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

    fn fetch(&self, term: &str) -> Option<Vec<DictionaryEntry>> {
        let url = format!("{}/{}", self.base_url, urlencode(term));
        self.policy.run(&format!("sentences '{}'", term), || {
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| FetchError::Failed(e.to_string()))?;
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
        })
    }
}

impl SentenceGenerator for FreeDictionary {
    fn sentences(&self, term: &str, max: usize) -> Vec<String> {
        match self.fetch(term) {
            Some(entries) => harvest_examples(&entries, max),
            None => {
                tracing::warn!("free dictionary failed for '{}'", term);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        "freedictionary"
    }
}

/// Walk dictionary entries collecting usable examples, first `max` kept.
fn harvest_examples(entries: &[DictionaryEntry], max: usize) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    'outer: for entry in entries {
        for meaning in &entry.meanings {
            for definition in &meaning.definitions {
                let Some(example) = &definition.example else {
                    continue;
                };
                let trimmed = example.trim();
                if trimmed.is_empty() || trimmed.chars().count() >= MAX_SENTENCE_LEN {
                    continue;
                }
                if sentences.iter().any(|s| s == trimmed) {
                    continue;
                }
                sentences.push(trimmed.to_string());
                if sentences.len() >= max {
                    break 'outer;
                }
            }
        }
    }

    sentences
}

// ---------------------------------------------------------------------------
// Wordnik
// ---------------------------------------------------------------------------

/// Sentence provider backed by the Wordnik examples API (requires a key).
pub struct Wordnik {
    client: Client,
    base_url: String,
    api_key: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct WordnikResponse {
    #[serde(default)]
    examples: Vec<WordnikExample>,
}

#[derive(Debug, Deserialize)]
struct WordnikExample {
    #[serde(default)]
    text: Option<String>,
}

impl Wordnik {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: WORDNIK_URL.to_string(),
            api_key: api_key.into(),
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

impl SentenceGenerator for Wordnik {
    fn sentences(&self, term: &str, max: usize) -> Vec<String> {
        if self.api_key.is_empty() {
            tracing::warn!("wordnik API key not provided");
            return Vec::new();
        }

        let url = format!("{}/{}/examples", self.base_url, urlencode(term));
        let limit = max.to_string();
        let fetched: Option<WordnikResponse> =
            self.policy.run(&format!("wordnik '{}'", term), || {
                let response = self
                    .client
                    .get(&url)
                    .query(&[("limit", limit.as_str()), ("api_key", &self.api_key)])
                    .send()
                    .map_err(|e| FetchError::Failed(e.to_string()))?;
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
            });

        let Some(parsed) = fetched else {
            tracing::warn!("wordnik failed for '{}'", term);
            return Vec::new();
        };

        parsed
            .examples
            .into_iter()
            .filter_map(|example| example.text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .take(max)
            .collect()
    }

    fn name(&self) -> &str {
        "wordnik"
    }
}

// ---------------------------------------------------------------------------
// Offline stub
// ---------------------------------------------------------------------------

/// Offline sentence provider: never touches the network, always empty.
#[derive(Debug, Default)]
pub struct OfflineSentences;

impl SentenceGenerator for OfflineSentences {
    fn sentences(&self, term: &str, _max: usize) -> Vec<String> {
        tracing::debug!("offline mode: sentence generation disabled for '{}'", term);
        Vec::new()
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Percent-encode a term for use as a path segment.
fn urlencode(term: &str) -> String {
    let mut encoded = String::with_capacity(term.len());
    for byte in term.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
