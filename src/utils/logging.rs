//! Logging utilities
//!
//! Helpers for keeping user content short in log lines

/// Number of prompt characters included in request logs
pub const PROMPT_PREVIEW_CHARS: usize = 50;

/// Truncate a string with a note about original length
///
/// Counts characters, so multi-byte text is never split mid-codepoint.
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let remaining = s[byte_idx..].chars().count();
            format!("{}... ({} chars truncated)", &s[..byte_idx], remaining)
        }
        None => s.to_string(),
    }
}

/// Short preview of a prompt for request logs
pub fn prompt_preview(prompt: &str) -> String {
    truncate_content(prompt, PROMPT_PREVIEW_CHARS)
}
