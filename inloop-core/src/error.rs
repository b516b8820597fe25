//! Error types for the inloop filter library.
//!
//! The filter kernels themselves are total functions over well-formed inputs
//! and never fail; errors arise only from configuration and parameter
//! validation at the library boundary.

use thiserror::Error;

/// Main error type for the inloop filter library.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No kernel implementation is viable for the requested bit depth.
    #[error("Unsupported bit depth: {bit_depth}")]
    UnsupportedBitDepth { bit_depth: u8 },

    /// No implementation registered for an operation.
    #[error("No implementation for operation: {operation}")]
    NoImplementation { operation: &'static str },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this error means a kernel could not be bound.
    #[must_use]
    pub fn is_binding_failure(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedBitDepth { .. } | Error::NoImplementation { .. }
        )
    }
}
