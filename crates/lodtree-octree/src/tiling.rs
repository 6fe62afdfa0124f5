//! TileGrid builder - split an image into fixed-size tiles
//!
//! Tiles are laid out row-major from the upper-left corner. Every tile is
//! `tile_size × tile_size` except those on the bottom and right borders,
//! which keep only the remaining rows or columns when the image extent is
//! not a multiple of the tile size. No tile is ever empty.
//!
//! Each tile is an independent copy of a disjoint source region, so the
//! tiles are extracted in parallel on the current rayon pool.

use lodtree_core::{Image, NdArray, Sample};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{OctreeError, OctreeResult};
use crate::tile::TileArray;

/// Number of tile rows and columns covering a `height × width` image.
///
/// # Examples
///
/// ```
/// use lodtree_octree::tile_grid_dims;
///
/// assert_eq!(tile_grid_dims(128, 128, 64), (2, 2));
/// assert_eq!(tile_grid_dims(100, 200, 64), (2, 4));
/// ```
#[inline]
pub fn tile_grid_dims(height: usize, width: usize, tile_size: usize) -> (usize, usize) {
    (height.div_ceil(tile_size), width.div_ceil(tile_size))
}

/// Split an image into a grid of tiles of edge `tile_size`.
///
/// # Errors
///
/// Returns `OctreeError::InvalidInput` if `tile_size` is 0.
///
/// # Examples
///
/// ```
/// use lodtree_core::Image;
/// use lodtree_octree::create_tiles;
///
/// let image = Image::<u8>::new(100, 100, 3).unwrap();
/// let tiles = create_tiles(&image, 64).unwrap();
/// assert_eq!(tiles.len(), 2);
/// assert_eq!(tiles[0][1].shape(), (64, 36, 3));
/// assert_eq!(tiles[1][1].shape(), (36, 36, 3));
/// ```
pub fn create_tiles<T: Sample>(image: &Image<T>, tile_size: usize) -> OctreeResult<TileArray<T>> {
    if tile_size == 0 {
        return Err(OctreeError::InvalidInput(
            "tile size must be positive".to_string(),
        ));
    }

    let (height, width, _) = image.shape();
    let (rows, cols) = tile_grid_dims(height, width, tile_size);
    debug!(height, width, tile_size, rows, cols, "Creating tiles");

    (0..rows)
        .into_par_iter()
        .map(|row| {
            (0..cols)
                .map(|col| {
                    image
                        .clip_region(row * tile_size, col * tile_size, tile_size, tile_size)
                        .map_err(OctreeError::from)
                })
                .collect::<OctreeResult<Vec<_>>>()
        })
        .collect()
}

/// Validate a raw array as an image and split it into tiles.
///
/// # Errors
///
/// - `OctreeError::Dimension` if the array rank is not 3
/// - `OctreeError::InvalidInput` for a zero extent or a zero `tile_size`
pub fn create_tiles_from_array<T: Sample>(
    array: &NdArray<T>,
    tile_size: usize,
) -> OctreeResult<TileArray<T>> {
    let (height, width, channels) = array.image_shape()?;
    let image = Image::from_data(height, width, channels, array.data().to_vec())?;
    create_tiles(&image, tile_size)
}
