use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::core::audio::AudioError;
use crate::core::stt::RecognitionError;
use crate::handlers::recognize::RecognizeResponse;

/// Client-facing message when the multipart body lacks an `audio` field.
pub const MISSING_AUDIO_MESSAGE: &str = "No audio file provided";

/// Client-facing message when the recognizer heard no words.
pub const NO_SPEECH_MESSAGE: &str = "Speech not detected. Please speak clearly.";

/// Errors surfaced by the HTTP layer.
///
/// `Display` carries the full internal detail for logs. What the client sees
/// comes from [`AppError::client_message`], which redacts internal failures.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No audio file provided")]
    MissingAudio,

    #[error("failed to read audio upload: {message}")]
    UploadRejected { status: StatusCode, message: String },

    #[error("Speech not detected. Please speak clearly.")]
    SpeechNotDetected,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("failed to store upload: {0}")]
    Storage(#[from] std::io::Error),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("speech recognition failed: {0}")]
    Recognition(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<RecognitionError> for AppError {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::NoSpeechDetected => AppError::SpeechNotDetected,
            RecognitionError::ServiceError(detail) => AppError::ServiceUnavailable(detail),
            RecognitionError::Other(detail) | RecognitionError::ConfigurationError(detail) => {
                AppError::Recognition(detail)
            }
        }
    }
}

impl AppError {
    /// Wrap a panic payload caught by the router as an internal error.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let detail = if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else {
            "unknown panic payload".to_string()
        };
        AppError::Internal(format!("handler panicked: {detail}"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingAudio => StatusCode::BAD_REQUEST,
            AppError::UploadRejected { status, .. } => *status,
            AppError::SpeechNotDetected => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_)
            | AppError::Audio(_)
            | AppError::Recognition(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    ///
    /// Upstream detail is passed through for service outages; internal
    /// failures only name their category.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingAudio => MISSING_AUDIO_MESSAGE.to_string(),
            AppError::UploadRejected { .. } => "Failed to read audio upload".to_string(),
            AppError::SpeechNotDetected => NO_SPEECH_MESSAGE.to_string(),
            AppError::ServiceUnavailable(detail) => format!("Service unavailable: {detail}"),
            AppError::Storage(_) => "Server error: could not store the uploaded audio".to_string(),
            AppError::Audio(_) => "Server error: audio could not be decoded".to_string(),
            AppError::Recognition(_) => "Server error: speech recognition failed".to_string(),
            AppError::Internal(_) => "Server error: internal processing failure".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(RecognizeResponse::failure(self.client_message())),
        )
            .into_response()
    }
}
