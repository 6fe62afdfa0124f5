//! lodtree Core - Basic data structures for the image pyramid
//!
//! This crate provides the containers used throughout lodtree:
//!
//! - [`NdArray`] - Raw owned array of any rank, as handed over by a reader
//! - [`Image`] - Dense height × width × channels image, used for the
//!   source image and for every tile
//! - [`Sample`] - Numeric element types an image may hold
//! - [`hstack`] / [`vstack`] - Joining images along a spatial axis

pub mod array;
pub mod error;
pub mod image;
pub mod sample;

pub use array::NdArray;
pub use error::{Error, Result};
pub use image::{IMAGE_RANK, Image, hstack, vstack};
pub use sample::Sample;
