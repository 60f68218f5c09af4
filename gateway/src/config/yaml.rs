use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// This structure represents the full configuration that can be loaded from a YAML file.
/// All fields are optional to allow partial configuration. Values present here override
/// environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 5000
///   tls:
///     enabled: false
///     cert_path: "/etc/voxname/cert.pem"
///     key_path: "/etc/voxname/key.pem"
///
/// storage:
///   temp_dir: "temp_audio"
///   max_upload_bytes: 26214400
///
/// recognizer:
///   provider: "google"
///   api_key: "your-google-speech-key"
///   endpoint: "http://www.google.com/speech-api/v2/recognize"
///   language: "en-IN"
///   profanity_filter: true
///   request_timeout_seconds: 60
///
/// security:
///   cors_allowed_origins: "*"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub storage: Option<StorageYaml>,
    pub recognizer: Option<RecognizerYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Upload handling from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    pub temp_dir: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

/// Speech recognizer settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RecognizerYaml {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub profanity_filter: Option<bool>,
    pub request_timeout_seconds: Option<u64>,
}

/// Security settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
