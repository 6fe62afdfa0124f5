//! Pyramid builder - derive each coarser level from the one below
//!
//! A coarser level is made by taking every non-overlapping 2×2
//! neighbourhood of tiles, joining it into one image (upper row left to
//! right, lower row left to right, then the two rows top to bottom) and
//! halving that image along both spatial axes. Each parent tile therefore
//! stays at most `tile_size` on a side.
//!
//! # Odd grids
//!
//! A grid with an odd number of tile rows or columns has no partner for
//! its last row or column. [`OddGridPolicy`] makes the behaviour explicit:
//!
//! - `MergePartial` merges whatever tiles the trailing group has (one or
//!   two), so a `rows × cols` grid always yields
//!   `ceil(rows/2) × ceil(cols/2)` parents
//! - `Error` refuses, requiring even grids at every level (power-of-two
//!   grids)
//!
//! Parent tiles are independent of each other, so they are computed in
//! parallel; the level as a whole must finish before the next starts.

use lodtree_core::{Image, Sample, hstack, vstack};
use lodtree_transform::{DownsampleMethod, downsample_2x};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::OctreeConfig;
use crate::error::{OctreeError, OctreeResult};
use crate::tile::TileArray;

/// Handling of tile grids with an odd row or column count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddGridPolicy {
    /// Merge the trailing row/column as a partial group
    #[default]
    MergePartial,
    /// Fail with `OctreeError::OddGrid`
    Error,
}

/// Options for one coarsening step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PyramidOptions {
    pub odd_grid: OddGridPolicy,
    pub downsample: DownsampleMethod,
}

impl From<&OctreeConfig> for PyramidOptions {
    fn from(config: &OctreeConfig) -> Self {
        Self {
            odd_grid: config.odd_grid,
            downsample: config.downsample,
        }
    }
}

/// Number of levels a `rows × cols` level-0 grid produces, root included.
///
/// Equals `ceil(log2(max(rows, cols))) + 1`.
pub fn num_levels_for_grid(rows: usize, cols: usize) -> usize {
    let mut extent = rows.max(cols).max(1);
    let mut levels = 1;
    while extent > 1 {
        extent = extent.div_ceil(2);
        levels += 1;
    }
    levels
}

/// Number of levels built for a `height × width` image with tiles of
/// edge `tile_size`: `ceil(log2(max(height, width) / tile_size)) + 1`,
/// never less than 1.
pub fn expected_num_levels(height: usize, width: usize, tile_size: usize) -> usize {
    let (rows, cols) = crate::tiling::tile_grid_dims(height, width, tile_size.max(1));
    num_levels_for_grid(rows, cols)
}

/// Create one parent tile from up to four child tiles.
///
/// `ur` is absent for a group in the last column of an odd-width grid,
/// `ll` for a group in the last row of an odd-height grid, and `lr` when
/// either is absent.
///
/// # Errors
///
/// Returns an error if the children do not line up (a lower-right tile
/// without a lower-left one, or mismatched extents).
pub fn create_downsampled_tile<T: Sample>(
    ul: &Image<T>,
    ur: Option<&Image<T>>,
    ll: Option<&Image<T>>,
    lr: Option<&Image<T>>,
    method: DownsampleMethod,
) -> OctreeResult<Image<T>> {
    let mut upper = vec![ul];
    upper.extend(ur);
    let top = hstack(&upper)?;

    let combined = match ll {
        Some(ll) => {
            let mut lower = vec![ll];
            lower.extend(lr);
            let bottom = hstack(&lower)?;
            vstack(&[&top, &bottom])?
        }
        None if lr.is_some() => {
            return Err(OctreeError::InvalidInput(
                "lower-right tile given without lower-left tile".to_string(),
            ));
        }
        None => top,
    };

    Ok(downsample_2x(&combined, method)?)
}

/// Return the next coarser level of tiles.
///
/// # Arguments
///
/// * `tiles` - The level to coarsen; must be a non-empty rectangular grid
/// * `level` - Index of `tiles`, used in errors and logs
/// * `options` - Odd grid policy and downsampling method
/// * `cancel` - Checked before each parent tile is built
///
/// # Errors
///
/// - `OctreeError::InvalidInput` for an empty or ragged grid
/// - `OctreeError::OddGrid` for an odd grid under `OddGridPolicy::Error`
/// - `OctreeError::Cancelled` if `cancel` fires during the step
pub fn create_coarser_level<T: Sample>(
    tiles: &TileArray<T>,
    level: usize,
    options: &PyramidOptions,
    cancel: Option<&CancellationToken>,
) -> OctreeResult<TileArray<T>> {
    let (rows, cols) = grid_dims(tiles)?;

    if options.odd_grid == OddGridPolicy::Error && (rows % 2 == 1 || cols % 2 == 1) {
        return Err(OctreeError::OddGrid { level, rows, cols });
    }

    let out_rows = rows.div_ceil(2);
    let out_cols = cols.div_ceil(2);
    debug!(
        level,
        rows,
        cols,
        out_rows,
        out_cols,
        "Creating coarser level"
    );

    (0..out_rows)
        .into_par_iter()
        .map(|prow| {
            (0..out_cols)
                .into_par_iter()
                .map(|pcol| {
                    if cancel.is_some_and(|token| token.is_cancelled()) {
                        return Err(OctreeError::Cancelled { level: level + 1 });
                    }
                    let (r, c) = (prow * 2, pcol * 2);
                    let ul = &tiles[r][c];
                    let ur = tiles[r].get(c + 1);
                    let lower = tiles.get(r + 1);
                    let ll = lower.map(|row| &row[c]);
                    let lr = lower.and_then(|row| row.get(c + 1));
                    create_downsampled_tile(ul, ur, ll, lr, options.downsample)
                })
                .collect::<OctreeResult<Vec<_>>>()
        })
        .collect()
}

/// Validate a tile grid and return `(rows, cols)`.
pub(crate) fn grid_dims<T>(tiles: &TileArray<T>) -> OctreeResult<(usize, usize)> {
    let rows = tiles.len();
    let cols = tiles.first().map_or(0, |row| row.len());
    if rows == 0 || cols == 0 {
        return Err(OctreeError::InvalidInput("empty tile grid".to_string()));
    }
    if let Some((r, row)) = tiles.iter().enumerate().find(|(_, row)| row.len() != cols) {
        return Err(OctreeError::InvalidInput(format!(
            "ragged tile grid: row {} has {} tiles, expected {}",
            r,
            row.len(),
            cols
        )));
    }
    Ok((rows, cols))
}
