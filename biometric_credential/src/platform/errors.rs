use thiserror::Error;

/// Exceptions raised by the platform credential API.
///
/// Variants follow the DOMException names browsers use for WebAuthn failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The user cancelled or denied the prompt, or the ceremony timed out
    #[error("NotAllowedError: {0}")]
    NotAllowed(String),

    /// The ceremony was aborted by the caller
    #[error("AbortError: {0}")]
    Abort(String),

    /// None of the requested algorithms or options are supported
    #[error("NotSupportedError: {0}")]
    NotSupported(String),

    /// The authenticator already holds an excluded credential
    #[error("InvalidStateError: {0}")]
    InvalidState(String),

    /// The RP id is not valid for the current origin
    #[error("SecurityError: {0}")]
    Security(String),

    #[error("{name}: {message}")]
    Other { name: String, message: String },
}

impl PlatformError {
    pub fn message(&self) -> &str {
        match self {
            Self::NotAllowed(m)
            | Self::Abort(m)
            | Self::NotSupported(m)
            | Self::InvalidState(m)
            | Self::Security(m) => m,
            Self::Other { message, .. } => message,
        }
    }
}
