//! Error types for lodtree-core
//!
//! Provides a unified error type for the array and image containers.
//! Each variant captures enough context for diagnostics without exposing
//! internal layout details.

use thiserror::Error;

/// lodtree-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Array rank differs from the rank the operation requires
    #[error("unexpected array dimension {actual}: expected {expected}")]
    InvalidRank { expected: usize, actual: usize },

    /// Zero-sized image extent
    #[error("invalid image dimensions: {height}x{width}x{channels}")]
    InvalidDimension {
        height: usize,
        width: usize,
        channels: usize,
    },

    /// Buffer length does not match the declared shape
    #[error("data length {len} doesn't match shape {shape:?}")]
    DataLengthMismatch { len: usize, shape: Vec<usize> },

    /// Shape whose element count does not fit in `usize`
    #[error("shape {shape:?} has too many elements")]
    ShapeOverflow { shape: Vec<usize> },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Images cannot be stacked along the requested axis
    #[error("incompatible image sizes for {axis} stack: {first:?} vs {second:?}")]
    IncompatibleSizes {
        axis: &'static str,
        first: (usize, usize, usize),
        second: (usize, usize, usize),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty input where at least one element is required
    #[error("null or empty input: {0}")]
    NullInput(&'static str),
}

/// Result type alias for lodtree-core operations
pub type Result<T> = std::result::Result<T, Error>;
