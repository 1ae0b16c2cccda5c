/*!
 * Error types for the scenesage application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when invoking a model provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response envelope fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// The provider answered but produced no completion
    #[error("Provider returned an empty completion")]
    EmptyResponse,

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Errors that can occur while parsing subtitle content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Timestamp text did not match `HH:MM:SS,mmm`
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),
}

/// Errors raised while configuring scene segmentation
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    /// Pause threshold must be a positive, finite number of seconds
    #[error("Invalid pause threshold: {0} (must be a positive number of seconds)")]
    InvalidThreshold(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Configuration is inconsistent or incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API key environment variable is unset or empty
    #[error("{0} environment variable not set")]
    MissingCredential(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from scene segmentation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
