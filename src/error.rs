use crate::core::types::BackendId;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardboardError {
    /// The requested manager id is not in the registry.
    #[error("No manager registered under id '{0}'")]
    UnknownBackend(BackendId),

    /// Resolving a registered id to a live provider failed.
    #[error("Failed to load manager '{backend}': {reason}")]
    LoadError { backend: BackendId, reason: String },

    /// The provider's own capability invocation failed. The message is the
    /// provider's payload, passed through verbatim.
    #[error("Manager '{backend}' failed: {message}")]
    BackendError { backend: BackendId, message: String },

    #[error("Manager '{backend}' did not respond within {limit:?}")]
    Timeout { backend: BackendId, limit: Duration },

    /// The spawned operation task panicked or was cancelled.
    #[error("Operation task for '{backend}' failed: {reason}")]
    TaskFailed { backend: BackendId, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Failed to open '{url}': {reason}")]
    UrlOpenFailed { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CardboardError>;
