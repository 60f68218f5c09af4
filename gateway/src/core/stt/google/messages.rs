//! Response types for the Google Web Speech API v2.
//!
//! The body is a sequence of JSON objects, one per line. The first line is
//! usually an empty `{"result":[]}` placeholder; the transcript, if any,
//! arrives in the first object whose `result` array is non-empty.

use serde::Deserialize;
use tracing::debug;

use super::super::base::RecognitionError;

/// One line of the response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResponse {
    #[serde(default)]
    pub result: Vec<SpeechResult>,

    pub result_index: Option<u32>,
}

/// A recognized utterance with its hypotheses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechResult {
    #[serde(default)]
    pub alternative: Vec<Alternative>,

    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// A single transcription hypothesis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alternative {
    pub transcript: Option<String>,

    /// Only present on the top hypothesis, if at all.
    pub confidence: Option<f64>,
}

impl SpeechResult {
    /// Highest-confidence alternative, or the first when none carries a confidence.
    pub fn best_alternative(&self) -> Option<&Alternative> {
        let mut best: Option<(&Alternative, f64)> = None;
        for alt in &self.alternative {
            if let Some(conf) = alt.confidence
                && best.is_none_or(|(_, c)| conf > c)
            {
                best = Some((alt, conf));
            }
        }
        best.map(|(alt, _)| alt).or_else(|| self.alternative.first())
    }
}

/// Extract the transcript from a raw response body.
///
/// # Errors
/// * `NoSpeechDetected` - no line has a result, the result has no
///   alternatives, or the chosen alternative has no transcript
/// * `Other` - a non-empty line is not valid JSON
pub fn parse_response_body(body: &str) -> Result<String, RecognitionError> {
    let mut first_result = None;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("Google speech response line: {}", line);

        let response: RecognitionResponse = serde_json::from_str(line).map_err(|e| {
            RecognitionError::Other(format!("malformed recognizer response: {e}"))
        })?;

        if let Some(result) = response.result.into_iter().next() {
            first_result = Some(result);
            break;
        }
    }

    let result = first_result.ok_or(RecognitionError::NoSpeechDetected)?;
    result
        .best_alternative()
        .and_then(|alt| alt.transcript.clone())
        .ok_or(RecognitionError::NoSpeechDetected)
}
