pub mod temp_file;
pub use temp_file::{TempAudioFile, ensure_temp_dir};
pub mod url_validation;
pub use url_validation::{UrlValidationError, validate_endpoint_url};
