//! Domain error types for the kokoro backend
//!
//! These enums cover the two failure classes that callers see directly:
//! invalid input and an unreachable/misbehaving inference backend.

use thiserror::Error;

/// Errors caused by the caller's input
#[derive(Error, Debug)]
pub enum InputError {
    /// Submitted text was empty or whitespace-only
    #[error("Text must not be empty")]
    EmptyText,

    /// Submitted text exceeds the configured limit
    #[error("Text too long: {len} characters (limit {max})")]
    TextTooLong { len: usize, max: usize },

    /// History window request outside the accepted range
    #[error("Invalid history window: {0} days")]
    InvalidDays(u32),
}

/// Errors from the model-inference sidecar
///
/// These are surfaced to callers as a degraded response; scores are never
/// fabricated when inference fails.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Backend could not be reached
    #[error("Inference backend unavailable: {0}")]
    Unavailable(String),

    /// Request timed out
    #[error("Inference request timeout")]
    Timeout,

    /// Backend answered with a non-success status
    #[error("Inference backend returned status {0}")]
    BadStatus(u16),

    /// Response body could not be decoded
    #[error("Failed to decode inference response: {0}")]
    Decode(String),
}

impl InferenceError {
    /// Whether a retry has a chance of succeeding
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::Timeout => true,
            Self::BadStatus(status) => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unavailable(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::BadStatus(status.as_u16())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
