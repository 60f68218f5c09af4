use async_trait::async_trait;
use thiserror::Error;

use crate::core::audio::AudioData;

/// Locale requested from the recognizer unless configured otherwise.
pub const DEFAULT_LANGUAGE: &str = "en-IN";

/// Default upper bound on a single recognition round trip.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Outcome of a failed recognition call.
///
/// The handler matches on these explicitly to pick the response status, so each
/// variant corresponds to one client-visible error class.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionError {
    /// The service answered but could not transcribe any words.
    #[error("speech not detected")]
    NoSpeechDetected,

    /// The service was unreachable or rejected the request.
    #[error("{0}")]
    ServiceError(String),

    /// Anything else, e.g. a response that could not be parsed.
    #[error("{0}")]
    Other(String),

    /// The recognizer could not be built from its configuration.
    #[error("recognizer configuration error: {0}")]
    ConfigurationError(String),
}

/// Recognizer settings shared by every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Provider name, e.g. "google"
    pub provider: String,
    /// API key; providers fall back to their own default when unset
    pub api_key: Option<String>,
    /// Endpoint override; providers fall back to their public endpoint when unset
    pub endpoint: Option<String>,
    /// BCP-47 locale tag sent with every request
    pub language: String,
    /// Ask the service to mask profanity in transcripts
    pub profanity_filter: bool,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            api_key: None,
            endpoint: None,
            language: DEFAULT_LANGUAGE.to_string(),
            profanity_filter: true,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// A speech-to-text service that transcribes a whole recording in one call.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe `audio` in the given locale.
    ///
    /// # Returns
    /// * `Ok(transcript)` - the best transcript the service produced
    /// * `Err(RecognitionError)` - see the variants for the failure classes
    async fn recognize(&self, audio: &AudioData, language: &str)
    -> Result<String, RecognitionError>;

    /// Human readable provider name, used in logs.
    fn provider_info(&self) -> &'static str;
}
