//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic test image
    #[error("failed to create test image '{name}': {source}")]
    ImageCreate {
        name: String,
        #[source]
        source: lodtree_core::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
