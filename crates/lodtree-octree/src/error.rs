//! Error types for lodtree-octree

use lodtree_transform::TransformError;
use thiserror::Error;

/// Errors that can occur while building or querying an octree
#[derive(Debug, Error)]
pub enum OctreeError {
    /// Input array does not have rank 3 (two spatial axes plus channels)
    #[error("unexpected array dimension {actual}: expected {expected}")]
    Dimension { expected: usize, actual: usize },

    /// Degenerate input: zero-sized extent or non-positive tile size
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Level, tile or chunk address outside the tree
    #[error("{what} index out of range: {index} not in [0, {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Tile grid cannot be merged 2×2 under `OddGridPolicy::Error`
    #[error("cannot merge odd {rows}x{cols} tile grid at level {level}")]
    OddGrid {
        level: usize,
        rows: usize,
        cols: usize,
    },

    /// Build was cancelled before completing
    #[error("octree build cancelled at level {level}")]
    Cancelled { level: usize },

    /// Invalid or unreadable configuration
    #[error("config error: {0}")]
    Config(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(lodtree_core::Error),

    /// Resampling error
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Worker pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lodtree_core::Error> for OctreeError {
    fn from(err: lodtree_core::Error) -> Self {
        match err {
            lodtree_core::Error::InvalidRank { expected, actual } => {
                OctreeError::Dimension { expected, actual }
            }
            lodtree_core::Error::InvalidDimension { .. }
            | lodtree_core::Error::ShapeOverflow { .. } => {
                OctreeError::InvalidInput(err.to_string())
            }
            other => OctreeError::Core(other),
        }
    }
}

/// Result type for octree operations
pub type OctreeResult<T> = Result<T, OctreeError>;
