//! Error types for Quill.

use thiserror::Error;

/// Primary error type for all Quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Inference API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse classification of a [`QuillError`], used to decide retry behavior
/// and the user-facing response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied bad input; rejected before any external call.
    Validation,
    /// The inference endpoint could not be reached or answered with a
    /// server-side failure.
    InferenceUnavailable,
    /// The inference call exceeded its configured time budget.
    InferenceTimeout,
    /// The endpoint answered but the envelope could not be understood.
    InferenceMalformedResponse,
    /// The artifact write failed; never user-visible.
    PersistFailed,
    /// The service itself is misconfigured.
    Configuration,
}

impl ErrorKind {
    /// Whether an error of this kind is worth another transport attempt.
    /// Only connection-level and server-side failures qualify; a
    /// deterministic rejection cannot succeed on retry.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::InferenceUnavailable | Self::InferenceTimeout)
    }
}

impl QuillError {
    /// Create an API error from a non-2xx inference response.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Timeout(_) => ErrorKind::InferenceTimeout,
            Self::Network(e) if e.is_timeout() => ErrorKind::InferenceTimeout,
            Self::Network(_) => ErrorKind::InferenceUnavailable,
            Self::Api { status, .. } if (500..=599).contains(status) => {
                ErrorKind::InferenceUnavailable
            }
            // Client-side rejections are deterministic; classify them with
            // parse failures so the retry loop leaves them alone.
            Self::Api { .. } => ErrorKind::InferenceMalformedResponse,
            Self::MalformedResponse(_) | Self::Serialization(_) => {
                ErrorKind::InferenceMalformedResponse
            }
            Self::Io(_) | Self::Storage(_) => ErrorKind::PersistFailed,
        }
    }

    /// Whether this error is potentially retryable at the transport layer.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_transient()
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QuillError>;
