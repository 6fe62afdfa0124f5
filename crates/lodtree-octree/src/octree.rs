//! Octree - the complete pyramid of levels
//!
//! Level 0 holds the source image split into tiles; every following level
//! is derived from the one before it until a single root tile remains.
//! Levels are built one at a time in a loop, with the tiles of each level
//! computed in parallel.
//!
//! # Examples
//!
//! ```
//! use lodtree_core::NdArray;
//! use lodtree_octree::Octree;
//!
//! let array = NdArray::<u8>::zeros(vec![128, 128, 3]).unwrap();
//! let octree = Octree::build(array).unwrap();
//! assert_eq!(octree.num_levels(), 2);
//! assert_eq!(octree.root().num_tiles(), 1);
//! ```

use std::time::Instant;

use lodtree_core::{Image, NdArray, Sample};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::chunk::{Chunk, ChunkLocation, Rect};
use crate::config::OctreeConfig;
use crate::error::{OctreeError, OctreeResult};
use crate::level::OctreeLevel;
use crate::pyramid::{PyramidOptions, create_coarser_level, expected_num_levels, grid_dims};
use crate::tile::Tile;
use crate::tiling::create_tiles;

/// An immutable tile pyramid, finest level first.
///
/// Once built the tree is never modified, so it can be shared between
/// threads (for example behind an `Arc`) without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Octree<T> {
    levels: Vec<OctreeLevel<T>>,
    tile_size: usize,
    source_shape: (usize, usize, usize),
}

impl<T: Sample> Octree<T> {
    /// Build an octree from a raw array with the default configuration.
    ///
    /// # Errors
    ///
    /// - `OctreeError::Dimension` if the array is not rank 3
    /// - `OctreeError::InvalidInput` if a spatial extent or the channel
    ///   count is zero
    pub fn build(array: NdArray<T>) -> OctreeResult<Self> {
        Self::build_with_config(array, &OctreeConfig::default())
    }

    /// Build an octree from a raw array.
    pub fn build_with_config(array: NdArray<T>, config: &OctreeConfig) -> OctreeResult<Self> {
        let image = Image::try_from(array)?;
        Self::from_image(&image, config)
    }

    /// Build an octree from an image.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, or with `OctreeError::OddGrid`
    /// when `config.odd_grid` is `OddGridPolicy::Error` and some level has
    /// an odd tile grid.
    pub fn from_image(image: &Image<T>, config: &OctreeConfig) -> OctreeResult<Self> {
        Self::build_on_pool(image, config, None)
    }

    /// Build an octree, giving up as soon as `cancel` fires.
    ///
    /// A cancelled build returns `OctreeError::Cancelled` with the index of
    /// the level being built; levels already finished are dropped.
    pub fn from_image_cancellable(
        image: &Image<T>,
        config: &OctreeConfig,
        cancel: &CancellationToken,
    ) -> OctreeResult<Self> {
        Self::build_on_pool(image, config, Some(cancel))
    }

    fn build_on_pool(
        image: &Image<T>,
        config: &OctreeConfig,
        cancel: Option<&CancellationToken>,
    ) -> OctreeResult<Self> {
        config.validate()?;

        let result = match config.worker_threads() {
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("lodtree-build-{}", i))
                    .build()?;
                pool.install(|| Self::build_levels(image, config, cancel))
            }
            None => Self::build_levels(image, config, cancel),
        };

        if let Err(OctreeError::Cancelled { level }) = &result {
            info!(level, "Octree build cancelled, partial levels dropped");
        }
        result
    }

    fn build_levels(
        image: &Image<T>,
        config: &OctreeConfig,
        cancel: Option<&CancellationToken>,
    ) -> OctreeResult<Self> {
        let start = Instant::now();
        let (height, width, channels) = image.shape();
        let options = PyramidOptions::from(config);
        let expected = expected_num_levels(height, width, config.tile_size);

        check_cancelled(cancel, 0)?;
        let mut current = create_tiles(image, config.tile_size)?;
        let mut levels = Vec::with_capacity(expected);

        loop {
            let level_index = levels.len();
            let (rows, cols) = grid_dims(&current)?;
            debug!(level = level_index, rows, cols, "Level complete");

            if rows == 1 && cols == 1 {
                levels.push(OctreeLevel::new(level_index, current)?);
                break;
            }

            check_cancelled(cancel, level_index + 1)?;
            let next = create_coarser_level(&current, level_index, &options, cancel)?;
            levels.push(OctreeLevel::new(level_index, current)?);
            current = next;
        }

        info!(
            height,
            width,
            channels,
            tile_size = config.tile_size,
            levels = levels.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Octree built"
        );

        Ok(Self {
            levels,
            tile_size: config.tile_size,
            source_shape: (height, width, channels),
        })
    }

    /// Get level `index`; 0 is full resolution.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::IndexOutOfRange` if `index >= num_levels()`.
    pub fn level(&self, index: usize) -> OctreeResult<&OctreeLevel<T>> {
        self.levels.get(index).ok_or(OctreeError::IndexOutOfRange {
            what: "level",
            index,
            len: self.levels.len(),
        })
    }

    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// All levels, finest first.
    #[inline]
    pub fn levels(&self) -> &[OctreeLevel<T>] {
        &self.levels
    }

    /// The coarsest level, holding a single tile.
    pub fn root(&self) -> &OctreeLevel<T> {
        // A built tree always has at least one level
        &self.levels[self.levels.len() - 1]
    }

    /// Tile edge length used for level 0.
    #[inline]
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// `(height, width, channels)` of the source image.
    #[inline]
    pub fn source_shape(&self) -> (usize, usize, usize) {
        self.source_shape
    }

    /// Every tile of level `index`, placed on the unit square.
    pub fn chunks_for_level(&self, index: usize) -> OctreeResult<Vec<Chunk<'_, T>>> {
        Ok(self.level(index)?.chunks())
    }

    /// Tiles of level `index` overlapping `view`.
    pub fn visible_chunks(&self, index: usize, view: &Rect) -> OctreeResult<Vec<Chunk<'_, T>>> {
        Ok(self.level(index)?.chunks_in_view(view))
    }

    /// Look up the tile at `location`.
    pub fn tile_at(&self, location: &ChunkLocation) -> OctreeResult<&Tile<T>> {
        self.level(location.level_index)?.tile(location.row, location.col)
    }

    /// The tile one level coarser that covers `location`, or `None` at the
    /// root.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::IndexOutOfRange` if `location` is not in the
    /// tree.
    pub fn parent(&self, location: &ChunkLocation) -> OctreeResult<Option<ChunkLocation>> {
        self.tile_at(location)?;
        let level_index = location.level_index + 1;
        if level_index >= self.levels.len() {
            return Ok(None);
        }
        let index = location.tile_index().parent();
        Ok(Some(ChunkLocation::new(level_index, index.row, index.col)))
    }

    /// The tiles one level finer covered by `location`: four, fewer along
    /// an odd grid edge, none at level 0.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::IndexOutOfRange` if `location` is not in the
    /// tree.
    pub fn children(&self, location: &ChunkLocation) -> OctreeResult<Vec<ChunkLocation>> {
        self.tile_at(location)?;
        let Some(level_index) = location.level_index.checked_sub(1) else {
            return Ok(Vec::new());
        };
        let finer = &self.levels[level_index];
        Ok(location
            .tile_index()
            .children()
            .into_iter()
            .filter(|index| finer.contains(*index))
            .map(|index| ChunkLocation::new(level_index, index.row, index.col))
            .collect())
    }

    /// Log a summary of every level at info level.
    pub fn log_info(&self) {
        let (height, width, channels) = self.source_shape;
        info!(
            height,
            width,
            channels,
            tile_size = self.tile_size,
            levels = self.levels.len(),
            "Octree"
        );
        for level in &self.levels {
            let (tile_height, tile_width, _) = level.tiles()[0].shape();
            info!(
                level = %level,
                tiles = level.num_tiles(),
                tile_height,
                tile_width,
                "Octree level"
            );
        }
    }
}

fn check_cancelled(cancel: Option<&CancellationToken>, level: usize) -> OctreeResult<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(OctreeError::Cancelled { level }),
        _ => Ok(()),
    }
}
