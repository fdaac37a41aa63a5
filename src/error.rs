//! Unified error handling for the kokoro crate
//!
//! Domain-specific errors live next to their modules; this module wraps
//! them into a single [`Error`] enum so results can cross module
//! boundaries without losing detail.
//!
//! # Architecture
//!
//! - [`KokoroErrorTrait`] - common interface implemented by error types
//! - [`ErrorCategory`] - classification used by handling strategies (HTTP
//!   status mapping, retry decisions)
//! - [`Error`] - unified enum wrapping the domain errors

use std::io;
use thiserror::Error;

pub use crate::utils::error::{InferenceError, InputError};

/// Common trait for kokoro error types
pub trait KokoroErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid caller input (rejected request)
    Input,
    /// Model inference backend failures (degraded response)
    Inference,
    /// Storage and I/O errors
    Storage,
    /// LLM reasoning/recommendation errors
    Llm,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the kokoro crate
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid caller input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Inference backend failures
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl KokoroErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Input(_) => false,
            Self::Inference(e) => e.is_recoverable(),
            Self::Database(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Http(_) => true,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Input(_) => ErrorCategory::Input,
            Self::Inference(_) | Self::Http(_) => ErrorCategory::Inference,
            Self::Database(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
