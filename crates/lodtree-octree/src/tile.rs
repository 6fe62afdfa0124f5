//! Tiles and tile addressing
//!
//! The tree is complete: every level is a dense grid, so there are no node
//! objects and no child pointers. A tile's parent one level up and its
//! children one level down are found by halving or doubling its grid
//! index.

use std::fmt;

use lodtree_core::{Image, Sample};

/// Row-major grid of tile images, one `Vec` per tile row.
pub type TileArray<T> = Vec<Vec<Image<T>>>;

/// Position of a tile within its level's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex {
    pub row: usize,
    pub col: usize,
}

impl TileIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index of the tile one level coarser that covers this one.
    #[inline]
    pub fn parent(self) -> TileIndex {
        TileIndex::new(self.row / 2, self.col / 2)
    }

    /// Indices of the four tiles one level finer, in the order upper-left,
    /// upper-right, lower-left, lower-right.
    ///
    /// On a level with an odd row or column count some of these lie
    /// outside the finer grid; [`OctreeLevel::contains`] filters them.
    ///
    /// [`OctreeLevel::contains`]: crate::OctreeLevel::contains
    #[inline]
    pub fn children(self) -> [TileIndex; 4] {
        let (r, c) = (self.row * 2, self.col * 2);
        [
            TileIndex::new(r, c),
            TileIndex::new(r, c + 1),
            TileIndex::new(r + 1, c),
            TileIndex::new(r + 1, c + 1),
        ]
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One tile: image data at one resolution plus its grid position.
///
/// Immutable once its level is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<T> {
    index: TileIndex,
    data: Image<T>,
}

impl<T: Sample> Tile<T> {
    pub fn new(index: TileIndex, data: Image<T>) -> Self {
        Self { index, data }
    }

    #[inline]
    pub fn index(&self) -> TileIndex {
        self.index
    }

    #[inline]
    pub fn data(&self) -> &Image<T> {
        &self.data
    }

    /// `(height, width, channels)` of the tile data.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.shape()
    }

    pub fn into_data(self) -> Image<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_halves() {
        assert_eq!(TileIndex::new(5, 2).parent(), TileIndex::new(2, 1));
        assert_eq!(TileIndex::new(0, 0).parent(), TileIndex::new(0, 0));
    }

    #[test]
    fn test_children_double() {
        let children = TileIndex::new(1, 3).children();
        assert_eq!(children[0], TileIndex::new(2, 6));
        assert_eq!(children[3], TileIndex::new(3, 7));
    }

    #[test]
    fn test_children_parent_roundtrip() {
        let index = TileIndex::new(4, 9);
        assert!(index.children().iter().all(|c| c.parent() == index));
    }
}
