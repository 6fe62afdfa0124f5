//! lodtree-transform - Spatial transformations for lodtree
//!
//! This crate provides the resampling used to build pyramid levels:
//!
//! - 2× downsampling by area mapping (box filter) or sampling
//! - Repeated reduction by a number of levels

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{DownsampleMethod, downsample_2x, downsample_levels, reduced_extent};
