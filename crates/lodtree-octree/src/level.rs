//! One resolution level of the pyramid
//!
//! A level stores its tiles as a flat row-major grid. Tile `(row, col)`
//! lives at `row * cols + col`; there is no per-tile allocation beyond the
//! tile's own buffer.

use std::fmt;

use lodtree_core::{Image, Sample, hstack, vstack};

use crate::chunk::{Chunk, ChunkLocation, Rect};
use crate::error::{OctreeError, OctreeResult};
use crate::pyramid::grid_dims;
use crate::tile::{Tile, TileArray, TileIndex};

/// A complete grid of tiles at one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OctreeLevel<T> {
    level_index: usize,
    rows: usize,
    cols: usize,
    tiles: Vec<Tile<T>>,
}

impl<T: Sample> OctreeLevel<T> {
    /// Create a level from a grid of tile images.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::InvalidInput` if the grid is empty or its rows
    /// differ in length.
    pub fn new(level_index: usize, tiles: TileArray<T>) -> OctreeResult<Self> {
        let (rows, cols) = grid_dims(&tiles)?;
        let tiles = tiles
            .into_iter()
            .enumerate()
            .flat_map(|(row, images)| {
                images
                    .into_iter()
                    .enumerate()
                    .map(move |(col, image)| Tile::new(TileIndex::new(row, col), image))
            })
            .collect();
        Ok(Self {
            level_index,
            rows,
            cols,
            tiles,
        })
    }

    /// 0 is full resolution.
    #[inline]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)` of the tile grid.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// True if `index` addresses a tile of this level.
    #[inline]
    pub fn contains(&self, index: TileIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    /// Get the tile at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::IndexOutOfRange` if either coordinate is
    /// outside the grid.
    pub fn tile(&self, row: usize, col: usize) -> OctreeResult<&Tile<T>> {
        if row >= self.rows {
            return Err(OctreeError::IndexOutOfRange {
                what: "tile row",
                index: row,
                len: self.rows,
            });
        }
        if col >= self.cols {
            return Err(OctreeError::IndexOutOfRange {
                what: "tile column",
                index: col,
                len: self.cols,
            });
        }
        Ok(&self.tiles[row * self.cols + col])
    }

    /// All tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[Tile<T>] {
        &self.tiles
    }

    /// Iterate over the tiles of one grid row.
    pub fn row_tiles(&self, row: usize) -> impl Iterator<Item = &Tile<T>> {
        self.tiles.iter().skip(row * self.cols).take(self.cols)
    }

    /// Edge length of each chunk in normalized coordinates.
    ///
    /// The level's longer grid axis spans the unit square, so every chunk
    /// stays inside it. For square and tall grids this is `1 / rows`.
    #[inline]
    pub fn chunk_size(&self) -> f64 {
        1.0 / self.rows.max(self.cols) as f64
    }

    /// Every tile of the level placed on the unit square, row-major.
    pub fn chunks(&self) -> Vec<Chunk<'_, T>> {
        let size = self.chunk_size();
        self.tiles
            .iter()
            .map(|tile| self.make_chunk(tile, size))
            .collect()
    }

    /// Chunks whose cells overlap `view`.
    ///
    /// Only the grid cells under the view are visited.
    pub fn chunks_in_view(&self, view: &Rect) -> Vec<Chunk<'_, T>> {
        let size = self.chunk_size();
        let first_row = cell_floor(view.y, size, self.rows);
        let first_col = cell_floor(view.x, size, self.cols);
        let end_row = cell_ceil(view.bottom(), size, self.rows);
        let end_col = cell_ceil(view.right(), size, self.cols);

        let mut chunks = Vec::new();
        for row in first_row..end_row {
            for col in first_col..end_col {
                let chunk = self.make_chunk(&self.tiles[row * self.cols + col], size);
                if chunk.bounds().intersects(view) {
                    chunks.push(chunk);
                }
            }
        }
        chunks
    }

    /// Reassemble the level's tiles into one image.
    ///
    /// At level 0 this reproduces the source image exactly.
    pub fn stitch(&self) -> OctreeResult<Image<T>> {
        let strips = (0..self.rows)
            .map(|row| {
                let images: Vec<&Image<T>> = self.row_tiles(row).map(Tile::data).collect();
                hstack(&images)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let strips: Vec<&Image<T>> = strips.iter().collect();
        Ok(vstack(&strips)?)
    }

    fn make_chunk<'a>(&self, tile: &'a Tile<T>, size: f64) -> Chunk<'a, T> {
        let index = tile.index();
        Chunk::new(
            tile.data(),
            ChunkLocation::new(self.level_index, index.row, index.col),
            (index.col as f64 * size, index.row as f64 * size),
            size,
        )
    }
}

/// First cell index whose span reaches past `coord`.
fn cell_floor(coord: f64, size: f64, len: usize) -> usize {
    if coord <= 0.0 {
        0
    } else {
        ((coord / size).floor() as usize).min(len)
    }
}

/// One past the last cell index whose span starts before `coord`.
fn cell_ceil(coord: f64, size: f64, len: usize) -> usize {
    if coord <= 0.0 {
        0
    } else {
        ((coord / size).ceil() as usize).min(len)
    }
}

impl<T> fmt::Display for OctreeLevel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level={} dim={}x{}", self.level_index, self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(rows: usize, cols: usize) -> OctreeLevel<u8> {
        let tiles = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| Image::new_with_value(2, 2, 1, (r * cols + c) as u8).unwrap())
                    .collect()
            })
            .collect();
        OctreeLevel::new(0, tiles).unwrap()
    }

    #[test]
    fn test_flat_indexing() {
        let level = level(2, 3);
        assert_eq!(level.dims(), (2, 3));
        assert_eq!(level.num_tiles(), 6);
        let tile = level.tile(1, 2).unwrap();
        assert_eq!(tile.index(), TileIndex::new(1, 2));
        assert_eq!(tile.data().get(0, 0, 0), Some(5));
    }

    #[test]
    fn test_tile_out_of_range() {
        let level = level(2, 3);
        assert!(matches!(
            level.tile(2, 0),
            Err(OctreeError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
        assert!(matches!(
            level.tile(0, 3),
            Err(OctreeError::IndexOutOfRange { index: 3, len: 3, .. })
        ));
        assert!(!level.contains(TileIndex::new(0, 3)));
        assert!(level.contains(TileIndex::new(1, 2)));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(OctreeLevel::<u8>::new(0, Vec::new()).is_err());
        assert!(OctreeLevel::<u8>::new(0, vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_chunk_positions_square() {
        let level = level(2, 2);
        let chunks = level.chunks();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].pos(), (0.0, 0.0));
        assert_eq!(chunks[1].pos(), (0.5, 0.0));
        assert_eq!(chunks[2].pos(), (0.0, 0.5));
        assert_eq!(chunks[3].pos(), (0.5, 0.5));
        assert!(chunks.iter().all(|c| c.size() == 0.5));
    }

    #[test]
    fn test_chunk_size_wide_grid() {
        let level = level(1, 4);
        assert_eq!(level.chunk_size(), 0.25);
        let last = level.chunks()[3];
        assert_eq!(last.pos(), (0.75, 0.0));
    }

    #[test]
    fn test_chunks_in_view() {
        let level = level(4, 4);
        let view = Rect::new(0.3, 0.3, 0.2, 0.2);
        let visible: Vec<_> = level
            .chunks_in_view(&view)
            .iter()
            .map(|c| (c.location().row, c.location().col))
            .collect();
        assert_eq!(visible, vec![(1, 1)]);

        let all = level.chunks_in_view(&Rect::unit());
        assert_eq!(all.len(), 16);

        let outside = level.chunks_in_view(&Rect::new(1.5, 1.5, 0.5, 0.5));
        assert!(outside.is_empty());
    }

    #[test]
    fn test_stitch() {
        let level = level(2, 2);
        let image = level.stitch().unwrap();
        assert_eq!(image.shape(), (4, 4, 1));
        assert_eq!(image.get(0, 0, 0), Some(0));
        assert_eq!(image.get(0, 2, 0), Some(1));
        assert_eq!(image.get(3, 1, 0), Some(2));
        assert_eq!(image.get(3, 3, 0), Some(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(level(2, 3).to_string(), "level=0 dim=2x3");
    }
}
