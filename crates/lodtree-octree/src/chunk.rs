//! Chunks - tiles placed in normalized scene coordinates
//!
//! A renderer does not care about pixel extents; it places each tile of
//! the chosen level on the unit square. A [`Chunk`] borrows a tile's data
//! and pairs it with that placement. Chunks are recomputed on every query
//! and never stored.

use std::fmt;

use lodtree_core::{Image, Sample};

use crate::tile::TileIndex;

/// Address of a tile anywhere in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkLocation {
    pub level_index: usize,
    pub row: usize,
    pub col: usize,
}

impl ChunkLocation {
    pub fn new(level_index: usize, row: usize, col: usize) -> Self {
        Self {
            level_index,
            row,
            col,
        }
    }

    /// Grid index within the level.
    #[inline]
    pub fn tile_index(&self) -> TileIndex {
        TileIndex::new(self.row, self.col)
    }
}

impl fmt::Display for ChunkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level={} row={} col={}", self.level_index, self.row, self.col)
    }
}

/// Axis-aligned rectangle in normalized `[0, 1]` coordinates.
///
/// `x` runs along columns, `y` along rows, origin at the upper-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole unit square.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the two rectangles share a region of non-zero area.
    ///
    /// Rectangles that only touch along an edge do not intersect, so a
    /// view ending exactly on a tile boundary does not pull in the next
    /// tile.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One tile of a level, placed for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a, T> {
    data: &'a Image<T>,
    location: ChunkLocation,
    pos: (f64, f64),
    size: f64,
}

impl<'a, T: Sample> Chunk<'a, T> {
    pub(crate) fn new(
        data: &'a Image<T>,
        location: ChunkLocation,
        pos: (f64, f64),
        size: f64,
    ) -> Self {
        Self {
            data,
            location,
            pos,
            size,
        }
    }

    /// The tile's pixel data.
    #[inline]
    pub fn data(&self) -> &'a Image<T> {
        self.data
    }

    /// Where the tile lives in the tree.
    #[inline]
    pub fn location(&self) -> ChunkLocation {
        self.location
    }

    /// Upper-left corner as `(x, y)`.
    #[inline]
    pub fn pos(&self) -> (f64, f64) {
        self.pos
    }

    /// Edge length of the chunk's square cell.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The chunk's cell as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.0, self.pos.1, self.size, self.size)
    }
}
