//! Error types for lodtree-transform

use thiserror::Error;

/// Errors that can occur during spatial transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lodtree_core::Error),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
