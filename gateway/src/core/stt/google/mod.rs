//! Google Web Speech API v2 provider implementation.
//!
//! # Request
//!
//! ```text
//! POST http://www.google.com/speech-api/v2/recognize?client=chromium&lang=en-IN&key=<key>
//! Content-Type: audio/l16; rate=16000
//!
//! <raw 16-bit little-endian mono PCM>
//! ```
//!
//! # Response
//!
//! Newline separated JSON objects:
//!
//! ```text
//! {"result":[]}
//! {"result":[{"alternative":[{"transcript":"my name is priya","confidence":0.93}],"final":true}],"result_index":0}
//! ```
//!
//! # Configuration
//!
//! ```bash
//! export GOOGLE_SPEECH_API_KEY="AIza..."      # optional, public key otherwise
//! export GOOGLE_SPEECH_ENDPOINT="http://..."  # optional
//! ```

mod client;
pub mod config;
pub mod messages;


pub use client::GoogleSpeechRecognizer;
pub use config::{DEFAULT_API_KEY, GOOGLE_SPEECH_URL, GoogleSpeechConfig, l16_content_type};
pub use messages::{Alternative, RecognitionResponse, SpeechResult, parse_response_body};
