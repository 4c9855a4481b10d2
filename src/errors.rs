/*!
 * Error types for the langtree library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The response was well-formed but carried no translation
    #[error("API returned no translation: {0}")]
    EmptyResponse(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// No backend is registered for the requested service
    #[error("No backend registered for service '{0}'")]
    UnknownService(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// A batch precondition that was not met; the batch never starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API key is required")]
    MissingCredential,

    #[error("Source language is required")]
    MissingSourceLanguage,

    #[error("Target language is required")]
    MissingTargetLanguage,

    #[error("No missing translations found")]
    NoItems,

    /// The language is not part of the loaded set
    #[error("Language '{0}' is not loaded")]
    UnknownLanguage(String),
}

/// A document could not be accepted as a translation tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The text is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The top-level value is not a mapping
    #[error("Document root must be an object, found {0}")]
    NotAnObject(&'static str),

    /// Nesting deeper than the configured guard
    #[error("Document nesting exceeds the maximum depth of {max_depth} at '{path}'")]
    TooDeep {
        /// Configured limit
        max_depth: usize,
        /// Path at which the limit was crossed
        path: String,
    },

    /// The file could not be read as UTF-8 text
    #[error("Unreadable file: {0}")]
    Unreadable(String),

    #[error("Key path must contain at least one segment")]
    EmptyPath,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Batch preconditions failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

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
