//! URL validation for configured upstream endpoints
//!
//! The recognizer endpoint is operator-supplied configuration. It is checked
//! once at startup so a typo fails the boot instead of every request.

use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not carry a query string, got: {0}")]
    QueryNotAllowed(String),
}

/// Validate an upstream service endpoint.
///
/// The endpoint must:
/// - Parse as an absolute URL
/// - Use `http` or `https`
/// - Have a host
/// - Not already carry query parameters (they are appended per request)
pub fn validate_endpoint_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if let Some(query) = parsed.query() {
        return Err(UrlValidationError::QueryNotAllowed(query.to_string()));
    }

    Ok(parsed)
}
