//! Unified error types for cdp-dispatch

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CDP error code reported when a command targets an execution context that no longer exists
pub const NIL_CONTEXT_ERROR_CODE: i64 = -32000;

/// Unified error type for cdp-dispatch
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wire frame could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload did not fit the event kind its method tag names
    #[error("Failed to decode {method} payload: {source}")]
    Decode {
        /// Method tag of the offending event
        method: String,
        /// Underlying decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Include/exclude pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern source text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Error object returned inside a CDP response
    #[error("CDP error {code}: {message}")]
    Protocol {
        /// CDP error code
        code: i64,
        /// CDP error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new decode error for the given method tag
    pub fn decode<S: Into<String>>(method: S, source: serde_json::Error) -> Self {
        Error::Decode {
            method: method.into(),
            source,
        }
    }

    /// Create a new invalid pattern error
    pub fn invalid_pattern<S: Into<String>>(pattern: S, source: regex::Error) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a new protocol error
    pub fn protocol<S: Into<String>>(code: i64, message: S) -> Self {
        Error::Protocol {
            code,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this is the CDP "cannot find context" error.
    ///
    /// It shows up when a page navigates away while a command is in flight
    /// and is normally safe to ignore.
    pub fn is_nil_context(&self) -> bool {
        matches!(self, Error::Protocol { code, .. } if *code == NIL_CONTEXT_ERROR_CODE)
    }
}
