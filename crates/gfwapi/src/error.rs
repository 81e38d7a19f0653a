//! Error types for GFW API operations.
//!
//! Errors are categorized so callers can tell a genuine failure apart from
//! an expected "does not exist" answer. Existence checks rely on
//! [`Error::is_not_found`] to treat a missing entity as normal flow.

use serde::Deserialize;
use std::fmt;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Application error code the API uses for a missing entity.
pub const NOT_FOUND_CODE: i64 = 404;

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout failure.
    Network,
    /// The API answered with the not-found application code.
    NotFound,
    /// The API rejected the request with a structured error.
    Application,
    /// A response or JSON blob could not be decoded.
    Decode,
    /// Input failed validation before any request was made.
    Validation,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Entity not found",
            Self::Application => "Request rejected by the API",
            Self::Decode => "Malformed JSON",
            Self::Validation => "Invalid configuration",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the API URL and your connection, then re-run",
            Self::NotFound => "The entity may have been deleted outside of this tool",
            Self::Application => "Check the error message returned by the API",
            Self::Decode => "Check that JSON attributes contain a valid JSON object",
            Self::Validation => "Fix the attribute named in the error and re-run",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Structured error body returned by the API on failure.
///
/// Only `code` is required; anything else in the body is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppError {
    /// Machine-readable error code.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Errors that can occur during API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection-level failure (never retried here).
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response carrying a decodable application error.
    #[error("API error {code} (HTTP {status}): {message}")]
    Application {
        /// HTTP status code.
        status: u16,
        /// Application error code from the body.
        code: i64,
        /// Message from the body.
        message: String,
    },

    /// Non-2xx response whose body is not an application error.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Malformed JSON in a response or an input blob.
    #[error("decode error: {0}")]
    Decode(String),

    /// Attribute failed validation before any request was made.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Flat attribute path, e.g. `configuration.0.format`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Operation that the API does not offer for this entity.
    #[error("{operation} is not supported for {resource_type}")]
    Unsupported {
        /// Resource type name.
        resource_type: String,
        /// Operation name.
        operation: String,
    },
}

impl Error {
    /// Create a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport(_) => ErrorCategory::Network,
            Error::Application { code, .. } if *code == NOT_FOUND_CODE => ErrorCategory::NotFound,
            Error::Application { .. } => ErrorCategory::Application,
            Error::Http { .. } => ErrorCategory::Other,
            Error::Decode(_) => ErrorCategory::Decode,
            Error::Validation { .. } => ErrorCategory::Validation,
            Error::Unsupported { .. } => ErrorCategory::Other,
        }
    }

    /// Whether this is the API's "not found" answer.
    ///
    /// A bare HTTP 404 without an application body is not treated as
    /// not-found; only the structured code counts.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
