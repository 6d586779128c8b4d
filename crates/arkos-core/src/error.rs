//! Error types for the Arkos client.

use thiserror::Error;

/// Result alias using [`ArkosError`].
pub type Result<T> = std::result::Result<T, ArkosError>;

/// A shared error type for the Arkos client core.
///
/// Every asynchronous failure is caught by the owning controller and
/// converted into a terminal, user-visible state; `ArkosError` values that
/// escape a controller's operation are synchronous rejections only
/// (validation failures and configuration problems).
#[derive(Error, Debug, Clone)]
pub enum ArkosError {
    /// Network-level failure (unreachable backend, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status or error payload.
    #[error("Backend error: {message}")]
    Backend {
        /// HTTP status code, when one was received.
        status: Option<u16>,
        message: String,
    },

    /// A precondition failed before any network activity.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error (unreadable or malformed config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArkosError {
    /// Creates a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Backend error.
    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a validation (synchronous precondition) error.
    pub fn is_validation(&self) -> bool {
        matches!(self, ArkosError::Validation(_))
    }

    /// Returns true if this is a transport-level error.
    pub fn is_transport(&self) -> bool {
        matches!(self, ArkosError::Transport(_))
    }
}
