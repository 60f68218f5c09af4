pub mod audio;
pub mod name_format;
pub mod stt;

// Re-export commonly used types for convenience
pub use audio::{AudioData, AudioError};
pub use name_format::format_name;
pub use stt::{
    GoogleSpeechConfig, GoogleSpeechRecognizer, RecognitionError, RecognizerConfig, STTProvider,
    SpeechRecognizer, create_recognizer, get_supported_stt_providers,
};
