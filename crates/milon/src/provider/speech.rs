//! Speech synthesis adapters.
//!
//! `speak` may block until synthesis completes or fails; `stop`, `pause`,
//! and `resume` are synchronous, idempotent, and safe with no active
//! playback.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{MilonError, Result};
use crate::word::Language;

use super::retry::{FetchError, RetryPolicy};

const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for speech synthesizers.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize and play an utterance.
    fn speak(&self, text: &str, lang: Language) -> Result<()>;

    /// Cancel any active playback. No-op when idle.
    fn stop(&self);

    /// Pause active playback. No-op unless speaking.
    fn pause(&self);

    /// Resume paused playback. No-op unless paused.
    fn resume(&self);

    /// Provider name, for logging and selection checks.
    fn name(&self) -> &str;
}

/// Utterance lifecycle for the on-device synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Playback {
    Idle,
    Speaking(String),
    Paused(String),
}

// ---------------------------------------------------------------------------
// On-device synthesis
// ---------------------------------------------------------------------------

/// On-device speech synthesizer.
///
/// Tracks the utterance lifecycle; the platform audio backend plugs in
/// behind this seam. This is the designated offline adapter: it never
/// performs a network call.
#[derive(Debug, Default)]
pub struct DeviceSpeech {
    state: Mutex<Option<Playback>>,
}

impl DeviceSpeech {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Some(Playback::Idle)),
        }
    }

    fn state(&self) -> Playback {
        self.state
            .lock()
            .expect("playback lock poisoned")
            .clone()
            .unwrap_or(Playback::Idle)
    }

    fn set_state(&self, next: Playback) {
        *self.state.lock().expect("playback lock poisoned") = Some(next);
    }

    /// True while an utterance is active (speaking or paused).
    pub fn is_active(&self) -> bool {
        self.state() != Playback::Idle
    }
}

impl SpeechSynthesizer for DeviceSpeech {
    fn speak(&self, text: &str, lang: Language) -> Result<()> {
        // Any ongoing utterance is cancelled first.
        self.stop();
        tracing::debug!("device speech: '{}' ({})", text, lang.locale());
        self.set_state(Playback::Speaking(text.to_string()));
        Ok(())
    }

    fn stop(&self) {
        self.set_state(Playback::Idle);
    }

    fn pause(&self) {
        if let Playback::Speaking(text) = self.state() {
            self.set_state(Playback::Paused(text));
        }
    }

    fn resume(&self) {
        if let Playback::Paused(text) = self.state() {
            self.set_state(Playback::Speaking(text));
        }
    }

    fn name(&self) -> &str {
        "device"
    }
}

// ---------------------------------------------------------------------------
// Google Cloud TTS
// ---------------------------------------------------------------------------

/// Network speech synthesizer backed by the Google Cloud TTS endpoint.
///
/// `speak` posts `{input, voice, audioConfig}` and keeps the returned
/// base64 MP3 audio available via [`GoogleSpeech::last_audio`].
pub struct GoogleSpeech {
    client: Client,
    base_url: String,
    api_key: String,
    policy: RetryPolicy,
    state: Mutex<Option<Playback>>,
    last_audio: Mutex<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    #[serde(rename = "audioContent")]
    audio_content: Option<String>,
}

impl GoogleSpeech {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| MilonError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: GOOGLE_TTS_URL.to_string(),
            api_key: api_key.into(),
            policy: RetryPolicy::default(),
            state: Mutex::new(Some(Playback::Idle)),
            last_audio: Mutex::new(None),
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

    /// Base64 audio from the most recent successful synthesis.
    pub fn last_audio(&self) -> Option<String> {
        self.last_audio.lock().expect("audio lock poisoned").clone()
    }

    fn state(&self) -> Playback {
        self.state
            .lock()
            .expect("playback lock poisoned")
            .clone()
            .unwrap_or(Playback::Idle)
    }

    fn set_state(&self, next: Playback) {
        *self.state.lock().expect("playback lock poisoned") = Some(next);
    }
}

impl SpeechSynthesizer for GoogleSpeech {
    fn speak(&self, text: &str, lang: Language) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(MilonError::Config(
                "Google TTS API key not provided".to_string(),
            ));
        }

        let body = serde_json::json!({
            "input": { "text": text },
            "voice": { "languageCode": lang.locale(), "ssmlGender": "NEUTRAL" },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        let fetched: Option<TtsResponse> = self.policy.run("tts", || {
            let response = self
                .client
                .post(&self.base_url)
                .query(&[("key", self.api_key.as_str())])
                .json(&body)
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

        let audio = fetched
            .and_then(|r| r.audio_content)
            .ok_or_else(|| MilonError::Config("No audio content received".to_string()))?;

        self.stop();
        *self.last_audio.lock().expect("audio lock poisoned") = Some(audio);
        self.set_state(Playback::Speaking(text.to_string()));
        Ok(())
    }

    fn stop(&self) {
        self.set_state(Playback::Idle);
    }

    fn pause(&self) {
        if let Playback::Speaking(text) = self.state() {
            self.set_state(Playback::Paused(text));
        }
    }

    fn resume(&self) {
        if let Playback::Paused(text) = self.state() {
            self.set_state(Playback::Speaking(text));
        }
    }

    fn name(&self) -> &str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_speech_lifecycle() {
        let speech = DeviceSpeech::new();
        assert!(!speech.is_active());

        speech.speak("שלום", Language::He).unwrap();
        assert!(speech.is_active());

        speech.pause();
        speech.resume();
        assert!(speech.is_active());

        speech.stop();
        assert!(!speech.is_active());
    }

    #[test]
    fn test_device_controls_idempotent_when_idle() {
        let speech = DeviceSpeech::new();
        speech.stop();
        speech.pause();
        speech.resume();
        speech.stop();
        assert!(!speech.is_active());
    }

    #[test]
    fn test_device_speak_replaces_current_utterance() {
        let speech = DeviceSpeech::new();
        speech.speak("one", Language::En).unwrap();
        speech.pause();
        speech.speak("two", Language::En).unwrap();
        // A fresh utterance is speaking, not paused.
        speech.resume();
        assert!(speech.is_active());
    }

    #[test]
    fn test_google_speech_requires_key() {
        let speech = GoogleSpeech::new("").unwrap();
        let err = speech.speak("hello", Language::En).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
