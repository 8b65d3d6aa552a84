use thiserror::Error;

use crate::platform::PlatformError;
use crate::storage::StorageError;
use crate::utils::UtilError;

/// Errors returned by biometric registration and authentication ceremonies.
///
/// `NotAllowed` is recoverable: the user may simply try again. `Unsupported` is
/// terminal for the current device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BiometricError {
    /// The execution context lacks a secure origin or public-key credential support
    #[error("Biometric authentication is not supported on this device")]
    Unsupported,

    /// The user declined the prompt or the ceremony timed out
    #[error("Biometric prompt was cancelled or timed out: {0}")]
    NotAllowed(String),

    /// Authentication was attempted for a username with no registered credential
    #[error("No biometric credential registered for {0}")]
    NoCredential(String),

    /// Any other platform or storage failure, with its message
    #[error("{0}")]
    Unknown(String),
}

impl BiometricError {
    /// Taxonomy name handed to UI callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unsupported => "Unsupported",
            Self::NotAllowed(_) => "NotAllowed",
            Self::NoCredential(_) => "NoCredential",
            Self::Unknown(_) => "Unknown",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotAllowed(_))
    }
}

impl From<PlatformError> for BiometricError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotAllowed(msg) | PlatformError::Abort(msg) => Self::NotAllowed(msg),
            other => Self::Unknown(other.message().to_string()),
        }
    }
}

impl From<StorageError> for BiometricError {
    fn from(err: StorageError) -> Self {
        Self::Unknown(err.to_string())
    }
}

impl From<UtilError> for BiometricError {
    fn from(err: UtilError) -> Self {
        Self::Unknown(err.to_string())
    }
}

impl From<serde_json::Error> for BiometricError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unknown(format!("Json conversion(Serde) error: {err}"))
    }
}
