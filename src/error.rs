//! Error types shared by every layer of the engine.

/// Errors reported by the Blotto engine.
///
/// Configuration errors are detected before any engine state is touched.
/// State errors indicate an internal-consistency fault and are checked at
/// the public boundary even though construction should rule them out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlottoError {
    #[error("InvalidConfiguration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("InvalidState: {reason}")]
    InvalidState { reason: String },
}

impl BlottoError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }
}

/// Shorthand for results carrying a [`BlottoError`].
pub type Result<T> = std::result::Result<T, BlottoError>;
