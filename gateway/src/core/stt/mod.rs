mod base;
pub mod google;

use std::sync::Arc;

// Re-export public types and traits
pub use base::{
    DEFAULT_LANGUAGE, DEFAULT_REQUEST_TIMEOUT_SECS, RecognitionError, RecognizerConfig,
    SpeechRecognizer,
};

// Re-export Google implementation
pub use google::{GOOGLE_SPEECH_URL, GoogleSpeechConfig, GoogleSpeechRecognizer};

/// Supported recognition providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum STTProvider {
    /// Google Web Speech API v2
    Google,
}

impl std::fmt::Display for STTProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            STTProvider::Google => write!(f, "google"),
        }
    }
}

impl std::str::FromStr for STTProvider {
    type Err = RecognitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "google-web-speech" => Ok(STTProvider::Google),
            _ => Err(RecognitionError::ConfigurationError(format!(
                "Unsupported STT provider: {s}. Supported providers: {}",
                get_supported_stt_providers().join(", ")
            ))),
        }
    }
}

/// Build the recognizer described by `config`.
///
/// # Example
/// ```rust,no_run
/// use voxname_gateway::core::stt::{RecognizerConfig, create_recognizer};
///
/// let recognizer = create_recognizer(&RecognizerConfig::default()).unwrap();
/// assert_eq!(recognizer.provider_info(), "Google Web Speech API v2");
/// ```
pub fn create_recognizer(
    config: &RecognizerConfig,
) -> Result<Arc<dyn SpeechRecognizer>, RecognitionError> {
    match config.provider.parse::<STTProvider>()? {
        STTProvider::Google => {
            let google = GoogleSpeechConfig::from_base(config)?;
            Ok(Arc::new(GoogleSpeechRecognizer::new(google)?))
        }
    }
}

/// Names accepted by [`create_recognizer`]
pub fn get_supported_stt_providers() -> Vec<&'static str> {
    vec!["google"]
}
