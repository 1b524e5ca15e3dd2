use std::borrow::Cow;

/// Max characters of an upstream body embedded in an error message.
pub const ERROR_BODY_LIMIT: usize = 500;

pub const LOG_BODY_LIMIT: usize = 2000;

pub const TRUNCATION_MARKER: &str = "... [TRUNCATED]";

pub fn truncate_chars(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((idx, _)) => Cow::Owned(format!("{}{}", &text[..idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}
