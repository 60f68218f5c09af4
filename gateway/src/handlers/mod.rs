//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `recognize` - Spoken name recognition from an uploaded recording

pub mod api;
pub mod recognize;

pub use recognize::{RecognizeResponse, recognize_speech};
