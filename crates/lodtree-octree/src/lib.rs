//! lodtree-octree - Multiresolution tile pyramids for lodtree
//!
//! This crate turns one large image into a complete pyramid of tiles for
//! level-of-detail rendering:
//!
//! - Tiling: split an image into fixed-size tiles with ragged borders
//! - Pyramid: merge 2×2 tile neighbourhoods into downsampled parents
//! - Octree: the ordered levels, with level/tile lookup and arithmetic
//!   parent/child navigation
//! - Chunks: tiles placed in normalized coordinates for a renderer
//!
//! Builds run on rayon and can be cancelled with a [`CancellationToken`].

pub mod chunk;
pub mod config;
mod error;
pub mod level;
pub mod octree;
pub mod pyramid;
pub mod tile;
pub mod tiling;

pub use chunk::{Chunk, ChunkLocation, Rect};
pub use config::{CONFIG_ENV_VAR, DEFAULT_DELAY_QUEUE_MS, DEFAULT_TILE_SIZE, OctreeConfig};
pub use error::{OctreeError, OctreeResult};
pub use level::OctreeLevel;
pub use octree::Octree;
pub use pyramid::{
    OddGridPolicy, PyramidOptions, create_coarser_level, create_downsampled_tile,
    expected_num_levels, num_levels_for_grid,
};
pub use tile::{Tile, TileArray, TileIndex};
pub use tiling::{create_tiles, create_tiles_from_array, tile_grid_dims};
pub use tokio_util::sync::CancellationToken;
