//! Common utilities and helpers

pub mod error;
pub mod retry;

pub use error::{InferenceError, InputError};
pub use retry::{with_retry_if, RetryConfig};

/// Truncate text for log output, keeping at most `max` characters.
///
/// Mood text can carry sensitive content; log lines only ever include a
/// short prefix.
pub fn truncate_for_log(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{truncated}...")
    }
}
