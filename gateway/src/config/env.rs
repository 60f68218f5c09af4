use std::path::PathBuf;
use std::str::FromStr;

use super::{ServerConfig, TlsConfig};

/// Read a variable, treating empty values as unset.
pub(super) fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable into `T`, with the variable name in the error.
pub(super) fn parse_env<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} ('{raw}'): {e}").into()),
        None => Ok(None),
    }
}

/// Parse a boolean flag ("true"/"false", "1"/"0", "yes"/"no", "on"/"off").
pub(super) fn parse_bool_env(key: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match env_var(key) {
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| format!("Invalid boolean for {key}: '{raw}'").into()),
        None => Ok(None),
    }
}

pub(super) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Build a TLS config from an enabled flag and optional paths.
pub(super) fn build_tls(
    enabled: bool,
    cert_path: Option<String>,
    key_path: Option<String>,
) -> Result<Option<TlsConfig>, Box<dyn std::error::Error>> {
    if !enabled {
        return Ok(None);
    }
    match (cert_path, key_path) {
        (Some(cert), Some(key)) => Ok(Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        })),
        _ => Err("TLS is enabled but TLS_CERT_PATH and TLS_KEY_PATH are not both set".into()),
    }
}

/// Load configuration from environment variables on top of the defaults.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::default();

    if let Some(host) = env_var("HOST") {
        config.host = host;
    }
    if let Some(port) = parse_env::<u16>("PORT")? {
        config.port = port;
    }

    let tls_enabled = parse_bool_env("TLS_ENABLED")?.unwrap_or(false);
    config.tls = build_tls(
        tls_enabled,
        env_var("TLS_CERT_PATH"),
        env_var("TLS_KEY_PATH"),
    )?;

    if let Some(dir) = env_var("TEMP_AUDIO_DIR") {
        config.temp_dir = PathBuf::from(dir);
    }
    if let Some(limit) = parse_env::<usize>("MAX_UPLOAD_BYTES")? {
        config.max_upload_bytes = limit;
    }

    if let Some(provider) = env_var("RECOGNIZER_PROVIDER") {
        config.recognizer.provider = provider;
    }
    config.recognizer.api_key = env_var("GOOGLE_SPEECH_API_KEY");
    config.recognizer.endpoint = env_var("GOOGLE_SPEECH_ENDPOINT");
    if let Some(language) = env_var("RECOGNITION_LANGUAGE") {
        config.recognizer.language = language;
    }
    if let Some(filter) = parse_bool_env("RECOGNITION_PROFANITY_FILTER")? {
        config.recognizer.profanity_filter = filter;
    }
    if let Some(timeout) = parse_env::<u64>("RECOGNITION_TIMEOUT_SECONDS")? {
        config.recognizer.request_timeout_seconds = timeout;
    }

    config.cors_allowed_origins = env_var("CORS_ALLOWED_ORIGINS");
    if let Some(rps) = parse_env::<u32>("RATE_LIMIT_REQUESTS_PER_SECOND")? {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = parse_env::<u32>("RATE_LIMIT_BURST_SIZE")? {
        config.rate_limit_burst_size = burst;
    }

    Ok(config)
}
