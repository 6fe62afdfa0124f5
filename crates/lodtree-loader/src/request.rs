//! Chunk load requests

use std::fmt;
use std::time::{Duration, Instant};

use lodtree_core::Sample;
use lodtree_octree::{Chunk, ChunkLocation};

/// Identifies one chunk of one layer.
///
/// Two requests with equal keys ask for the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub layer_id: u64,
    pub level_index: usize,
    pub row: usize,
    pub col: usize,
}

impl ChunkKey {
    pub fn new(layer_id: u64, location: ChunkLocation) -> Self {
        Self {
            layer_id,
            level_index: location.level_index,
            row: location.row,
            col: location.col,
        }
    }

    #[inline]
    pub fn location(&self) -> ChunkLocation {
        ChunkLocation::new(self.level_index, self.row, self.col)
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "layer={} level={} row={} col={}",
            self.layer_id, self.level_index, self.row, self.col
        )
    }
}

/// A request to load one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub key: ChunkKey,
    pub created: Instant,
}

impl ChunkRequest {
    pub fn new(key: ChunkKey) -> Self {
        Self {
            key,
            created: Instant::now(),
        }
    }

    /// Request the chunk a renderer is about to draw.
    pub fn for_chunk<T: Sample>(layer_id: u64, chunk: &Chunk<'_, T>) -> Self {
        Self::new(ChunkKey::new(layer_id, chunk.location()))
    }

    /// Time since the request was made.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}
