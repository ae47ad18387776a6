//! Error types for the permission layer

use permbridge_sdk::BackendError;

/// State errors from the global access point.
///
/// Both variants signal startup-time programming errors, not conditions
/// to be handled per call.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// `get` was called before a provider was published
    #[error("permission provider has not been initialized")]
    NotInitialized,

    /// `set` was called a second time
    #[error("permission provider has already been initialized")]
    AlreadyInitialized,
}

/// Failures during adapter construction.
///
/// Resolution finding no backend at all is not an error - it is a
/// supported outcome modeled as `None`.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The backend's entry point could not actually be acquired, even
    /// though detection considered it present
    #[error("backend not available: {iface}")]
    BackendUnavailable { iface: &'static str },
}

/// Failure channel for async mutations.
///
/// Cloneable so a [`Completion`](crate::tasks::Completion) can hand the
/// same outcome to every observer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The backend reported a communication failure
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The background executor went away before the task ran
    #[error("background worker is gone")]
    WorkerGone,
}
