use super::ServerConfig;
use crate::core::stt::STTProvider;
use crate::utils::validate_endpoint_url;

/// Validate a fully merged configuration.
pub(super) fn validate_config(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_recognizer(config)?;
    validate_limits(config)?;
    Ok(())
}

fn validate_recognizer(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let recognizer = &config.recognizer;

    recognizer
        .provider
        .parse::<STTProvider>()
        .map_err(|e| e.to_string())?;

    if recognizer.language.trim().is_empty() {
        return Err("Recognition language must not be empty".into());
    }

    if let Some(ref endpoint) = recognizer.endpoint {
        validate_endpoint_url(endpoint)
            .map_err(|e| format!("Invalid recognizer endpoint '{endpoint}': {e}"))?;
    }

    if recognizer.request_timeout_seconds == 0 {
        return Err("Recognition timeout must be greater than zero".into());
    }

    Ok(())
}

fn validate_limits(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.max_upload_bytes == 0 {
        return Err("Maximum upload size must be greater than zero".into());
    }

    if config.rate_limit_requests_per_second == 0 {
        return Err("Rate limit requests per second must be greater than zero".into());
    }

    if config.rate_limit_burst_size == 0 {
        return Err("Rate limit burst size must be greater than zero".into());
    }

    Ok(())
}
