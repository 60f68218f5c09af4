//! Google Web Speech API v2 client.
//!
//! The whole recording is sent as raw L16 PCM in a single POST; the service
//! answers once with every hypothesis it has. There is no streaming and no
//! retry: a failed call is reported to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use super::super::base::{RecognitionError, SpeechRecognizer};
use super::config::{GoogleSpeechConfig, MIN_SAMPLE_RATE, l16_content_type};
use super::messages::parse_response_body;
use crate::core::audio::AudioData;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("VoxName-Gateway/", env!("CARGO_PKG_VERSION"));

/// Recognizer backed by the Google Web Speech API v2.
///
/// The HTTP client is built once and shared by all requests for connection
/// pooling; the recognizer itself holds no per-request state.
pub struct GoogleSpeechRecognizer {
    config: GoogleSpeechConfig,
    http_client: Client,
}

impl GoogleSpeechRecognizer {
    /// Create a recognizer from resolved provider configuration.
    pub fn new(config: GoogleSpeechConfig) -> Result<Self, RecognitionError> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                RecognitionError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(
        &self,
        audio: &AudioData,
        language: &str,
    ) -> Result<String, RecognitionError> {
        if audio.sample_rate < MIN_SAMPLE_RATE {
            warn!(
                "Sample rate {} Hz is below the {} Hz the service expects; sending as-is",
                audio.sample_rate, MIN_SAMPLE_RATE
            );
        }

        info!(
            "Sending {} bytes of audio to Google speech ({} Hz, lang: {})",
            audio.frame_data.len(),
            audio.sample_rate,
            language
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .query(&self.config.query_params(language))
            .header(CONTENT_TYPE, l16_content_type(audio.sample_rate))
            .body(audio.frame_data.clone())
            .send()
            .await
            .map_err(|e| {
                RecognitionError::ServiceError(format!("recognition connection failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            debug!("Google speech returned HTTP {}", status);
            return Err(RecognitionError::ServiceError(format!(
                "recognition request failed: {reason}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            RecognitionError::ServiceError(format!("recognition connection failed: {e}"))
        })?;

        parse_response_body(&body)
    }

    fn provider_info(&self) -> &'static str {
        "Google Web Speech API v2"
    }
}
