//! lodtree - Multiresolution image octree for Rust
//!
//! lodtree cuts a large image into tiles and builds a complete pyramid of
//! coarser levels above them, so a viewer can draw any region at the
//! resolution it needs without loading the whole image at full detail.
//!
//! # Overview
//!
//! - Core containers: raw arrays, dense images, sample types
//! - Downsampling by area mapping or sampling
//! - Tiling, pyramid construction, level and chunk queries
//! - Delayed, cancellable chunk load requests
//!
//! # Example
//!
//! ```
//! use lodtree::NdArray;
//! use lodtree::octree::{Octree, Rect};
//!
//! let array = NdArray::<u8>::zeros(vec![256, 256, 3]).unwrap();
//! let tree = Octree::build(array).unwrap();
//! assert_eq!(tree.num_levels(), 3);
//!
//! // Chunks of the finest level under the upper-left quarter of the view
//! let visible = tree.visible_chunks(0, &Rect::new(0.0, 0.0, 0.5, 0.5)).unwrap();
//! assert_eq!(visible.len(), 4);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use lodtree_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use lodtree_loader as loader;
pub use lodtree_octree as octree;
pub use lodtree_transform as transform;
