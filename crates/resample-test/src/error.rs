//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Requested test pattern does not exist
    #[error("unknown test pattern '{0}'")]
    UnknownPattern(String),

    /// Failed to build a test image
    #[error("failed to create test image '{name}': {source}")]
    ImageCreate {
        name: String,
        #[source]
        source: resample_core::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
