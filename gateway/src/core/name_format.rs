//! Transcript post-processing for spoken names.
//!
//! Callers typically introduce themselves ("my name is ...", "i am ..."), so the
//! recognized transcript is stripped of those filler phrases and title-cased
//! before being returned to the client.

/// Filler phrases removed from the lower-cased transcript, in removal order.
///
/// Removal is plain substring replacement, so a phrase embedded inside a longer
/// word is removed as well.
pub const FILLER_PHRASES: [&str; 2] = ["my name is", "i am"];

/// Turn a raw transcript into a formatted name.
///
/// Lower-cases the transcript, removes every [`FILLER_PHRASES`] occurrence,
/// trims surrounding whitespace and title-cases the remainder.
///
/// # Example
/// ```
/// use voxname_gateway::core::name_format::format_name;
///
/// assert_eq!(format_name("My Name Is John Smith"), "John Smith");
/// assert_eq!(format_name("I Am Priya"), "Priya");
/// ```
pub fn format_name(transcript: &str) -> String {
    let mut cleaned = transcript.to_lowercase();
    for phrase in FILLER_PHRASES {
        cleaned = cleaned.replace(phrase, "");
    }
    title_case(cleaned.trim())
}

/// Capitalize the first character of every whitespace-separated token.
///
/// The remaining characters of each token are lower-cased and the original
/// whitespace between tokens is preserved.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_token_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            at_token_start = true;
            out.push(ch);
        } else if at_token_start {
            at_token_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}
