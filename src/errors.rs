//! Error handling

use thiserror::Error;

/// Errors returned by the client and its helpers
#[derive(Error, Debug)]
pub enum JcError {
    /// The request could not be built or sent, or the body could not be read
    #[error("{operation} failed: {message}")]
    Transport { operation: String, message: String },

    /// The service answered with anything other than `200 OK`
    #[error("{operation} returned HTTP status '{status}'")]
    Status { operation: String, status: String },

    /// The response did not have the shape expected for the resource
    #[error("could not decode {resource}: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    /// The service did not echo back the natural key that was sent
    #[error(
        "service returned {resource} '{actual}' where '{expected}' was sent; refusing to use the response"
    )]
    Integrity {
        resource: &'static str,
        expected: String,
        actual: String,
    },

    /// Caller-side precondition failure
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or incomplete client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization of an outgoing body failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, JcError>;

impl JcError {
    pub(crate) fn transport(operation: impl Into<String>, message: impl ToString) -> Self {
        JcError::Transport {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn decode(resource: &'static str, message: impl ToString) -> Self {
        JcError::Decode {
            resource,
            message: message.to_string(),
        }
    }

    pub(crate) fn integrity(
        resource: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        JcError::Integrity {
            resource,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Network, status and body-read failures
    pub fn is_transport(&self) -> bool {
        matches!(self, JcError::Transport { .. } | JcError::Status { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, JcError::Decode { .. })
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, JcError::Integrity { .. })
    }

    /// HTTP status string when the service rejected the request
    pub fn status(&self) -> Option<&str> {
        match self {
            JcError::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}
