use std::path::PathBuf;

use super::ServerConfig;
use super::env::{build_tls, load_from_env};
use super::yaml::YamlConfig;

/// Merge environment-derived configuration with optional YAML overrides.
///
/// Environment variables (and defaults) form the base; any value present in
/// the YAML file replaces the corresponding base value.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(tls) = server.tls {
            let (base_cert, base_key) = match config.tls.take() {
                Some(existing) => (
                    Some(existing.cert_path.display().to_string()),
                    Some(existing.key_path.display().to_string()),
                ),
                None => (None, None),
            };
            config.tls = build_tls(
                tls.enabled.unwrap_or(true),
                tls.cert_path.or(base_cert),
                tls.key_path.or(base_key),
            )?;
        }
    }

    if let Some(storage) = yaml.storage {
        if let Some(dir) = storage.temp_dir {
            config.temp_dir = PathBuf::from(dir);
        }
        if let Some(limit) = storage.max_upload_bytes {
            config.max_upload_bytes = limit;
        }
    }

    if let Some(recognizer) = yaml.recognizer {
        if let Some(provider) = recognizer.provider {
            config.recognizer.provider = provider;
        }
        if recognizer.api_key.is_some() {
            config.recognizer.api_key = recognizer.api_key;
        }
        if recognizer.endpoint.is_some() {
            config.recognizer.endpoint = recognizer.endpoint;
        }
        if let Some(language) = recognizer.language {
            config.recognizer.language = language;
        }
        if let Some(filter) = recognizer.profanity_filter {
            config.recognizer.profanity_filter = filter;
        }
        if let Some(timeout) = recognizer.request_timeout_seconds {
            config.recognizer.request_timeout_seconds = timeout;
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    Ok(config)
}
