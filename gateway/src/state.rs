use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::stt::{SpeechRecognizer, create_recognizer};
use crate::errors::{AppError, AppResult};
use crate::utils::ensure_temp_dir;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub config: ServerConfig,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    /// Temp directory, guaranteed to exist once the state is built
    pub temp_dir: PathBuf,
}

impl AppState {
    /// Build the state for `config`, creating the configured recognizer.
    ///
    /// Ensures the temp directory exists; this is the only place it is created.
    pub async fn new(config: ServerConfig) -> AppResult<Arc<Self>> {
        let recognizer = create_recognizer(&config.recognizer)?;
        Self::with_recognizer(config, recognizer).await
    }

    /// Build the state around an already constructed recognizer.
    pub async fn with_recognizer(
        config: ServerConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> AppResult<Arc<Self>> {
        let dir = config.temp_dir.clone();
        let temp_dir = tokio::task::spawn_blocking(move || ensure_temp_dir(&dir))
            .await
            .map_err(|e| AppError::Internal(format!("temp dir setup task failed: {e}")))??;

        info!(
            "Recognizer: {} (lang: {}), temp dir: {}",
            recognizer.provider_info(),
            config.recognizer.language,
            temp_dir.display()
        );

        Ok(Arc::new(Self {
            config,
            recognizer,
            temp_dir,
        }))
    }
}
