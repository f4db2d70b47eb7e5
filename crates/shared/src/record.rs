//! One submitted answer as kept in the history log.

use crate::mode::ThinkingMode;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Contexts longer than this many characters are shortened before storage.
pub const CONTEXT_PREVIEW_CHARS: usize = 100;

/// Appended to a shortened context.
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Local wall-clock time of the submission (ISO-8601, no offset)
    pub timestamp: NaiveDateTime,
    pub response: String,
    /// Decision context, shortened by [`truncate_context`]
    pub context: String,
    pub thinking_mode: ThinkingMode,
}

impl ResponseRecord {
    /// Build a record stamped with the current local time.
    pub fn new(response: impl Into<String>, context: &str, mode: ThinkingMode) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            response: response.into(),
            context: truncate_context(context),
            thinking_mode: mode,
        }
    }

    /// Short label for menus: at most `max_chars` characters of the response.
    pub fn label(&self, max_chars: usize) -> String {
        truncate_chars(&self.response, max_chars)
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Shorten a decision context to [`CONTEXT_PREVIEW_CHARS`] characters plus
/// [`TRUNCATION_MARKER`]. Shorter contexts come back unchanged.
pub fn truncate_context(context: &str) -> String {
    truncate_chars(context, CONTEXT_PREVIEW_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
