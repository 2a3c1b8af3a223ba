//! Custom error types for pipeline operations

use thiserror::Error;

use crate::core::models::Language;

/// Pipeline-related errors
///
/// Enhancement failures never appear here: they are absorbed into
/// [`crate::core::models::Enhancement`] by design.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No translation model is mapped for the requested pair
    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedPair {
        /// Requested source language
        from: Language,
        /// Requested target language
        to: Language,
    },

    /// Translation or scoring model failed to load or run
    #[error("Model error: {model} - {message}")]
    ModelError {
        /// Hosted model identifier
        model: String,
        /// Underlying cause
        message: String,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying cause
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was missing or malformed
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is missing or invalid
        message: String,
    },

    /// Speech synthesis error
    #[error("Speech error: {message}")]
    SpeechError {
        /// Underlying cause
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        PipelineError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
