//! Speech-to-name recognition endpoint.
//!
//! One request, one linear path: persist upload → decode → recognize →
//! format → respond. The uploaded bytes live in a [`TempAudioFile`] whose
//! guard removes the file however the request ends.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::audio::AudioData;
use crate::core::name_format::format_name;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::TempAudioFile;

/// Multipart field carrying the WAV recording.
pub const AUDIO_FIELD: &str = "audio";

/// JSON body of every `/recognize` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognizeResponse {
    pub success: bool,
    /// Formatted name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raw transcript as returned by the recognizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecognizeResponse {
    pub fn success(text: String, original_text: String) -> Self {
        Self {
            success: true,
            text: Some(text),
            original_text: Some(original_text),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            text: None,
            original_text: None,
            error: Some(error),
        }
    }
}

/// Recognize a spoken name from an uploaded WAV recording
///
/// Expects a multipart body with the recording in the `audio` field.
///
/// # Responses
/// * 200 - `{"success": true, "text": "John Smith", "original_text": "my name is John Smith"}`
/// * 400 - no `audio` field
/// * 422 - the recognizer heard no speech
/// * 500 - the upload could not be stored or decoded, or another internal failure
/// * 503 - the recognition service is unreachable or rejected the request
pub async fn recognize_speech(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match process_upload(&state, multipart).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            match &err {
                AppError::MissingAudio | AppError::UploadRejected { .. } => {
                    info!("Recognition request rejected: {}", err)
                }
                AppError::SpeechNotDetected => warn!("No speech detected in upload"),
                AppError::ServiceUnavailable(detail) => {
                    warn!("Recognition service unavailable: {}", detail)
                }
                _ => error!("Recognition request failed: {}", err),
            }
            err.into_response()
        }
    }
}

async fn process_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<RecognizeResponse> {
    let upload = read_audio_field(multipart).await?;
    info!("Recognition request received: {} bytes", upload.len());

    let dir = state.temp_dir.clone();
    // Held across the recognizer call; dropping it removes the file
    let (temp_file, audio) = tokio::task::spawn_blocking(move || {
        let temp_file = TempAudioFile::create(&dir, &upload)?;
        let audio = AudioData::from_wav_file(temp_file.path())?;
        Ok::<_, AppError>((temp_file, audio))
    })
    .await
    .map_err(|e| AppError::Internal(format!("audio loading task failed: {e}")))??;

    debug!(
        "Decoded {:.2}s of audio at {} Hz",
        audio.duration_secs(),
        audio.sample_rate
    );

    let outcome = state
        .recognizer
        .recognize(&audio, &state.config.recognizer.language)
        .await;
    release_temp_file(temp_file).await;

    let transcript = outcome?;
    let formatted = format_name(&transcript);

    info!(
        "Recognition complete: {} transcript characters, {} name characters",
        transcript.len(),
        formatted.len()
    );

    Ok(RecognizeResponse::success(formatted, transcript))
}

/// Drop the guard on the blocking pool so file removal stays off the async workers.
///
/// If the request future is cancelled before this point the guard still drops
/// inline, wherever the future is dropped.
async fn release_temp_file(temp_file: TempAudioFile) {
    if let Err(e) = tokio::task::spawn_blocking(move || drop(temp_file)).await {
        warn!("Temp file cleanup task failed: {}", e);
    }
}

/// Pull the `audio` file part out of the multipart body.
///
/// Other fields are ignored, and so is an `audio` part sent as a plain form
/// value (no `filename`).
async fn read_audio_field(multipart: Result<Multipart, MultipartRejection>) -> AppResult<Bytes> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request body is not multipart: {}", e);
        AppError::MissingAudio
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(AppError::MissingAudio),
            Err(e) => {
                return Err(AppError::UploadRejected {
                    status: e.status(),
                    message: e.body_text(),
                });
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        if field.file_name().is_none() {
            debug!("Ignoring `{}` form value without a filename", AUDIO_FIELD);
            continue;
        }

        return field
            .bytes()
            .await
            .map_err(|e| AppError::UploadRejected {
                status: e.status(),
                message: e.body_text(),
            });
    }
}
