//! Error types for the interceptor chain

use thiserror::Error;

/// Interceptor chain error
#[derive(Debug, Error)]
pub enum Error {
    /// Registry enumeration failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// An interceptor rejected or failed to process a batch
    #[error("Interceptor {interceptor} failed: {reason}")]
    Interceptor {
        /// Name of the failing interceptor
        interceptor: String,
        /// Failure reason
        reason: String,
    },

    /// Application batch handler failed
    #[error("Handler error: {0}")]
    Handler(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an interceptor fault
    pub fn interceptor(interceptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Interceptor {
            interceptor: interceptor.into(),
            reason: reason.into(),
        }
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
