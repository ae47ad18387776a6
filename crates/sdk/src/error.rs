//! Backend failure type

/// Failure reported by a backend entry point.
///
/// Covers true backend-communication failures only. "Identity not known"
/// is never an error anywhere in permbridge - backends model it as
/// `None`/empty results instead.
#[derive(Debug, Clone, thiserror::Error)]
#[error("backend call failed: {message}")]
pub struct BackendError {
    /// Backend-supplied failure description
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;
