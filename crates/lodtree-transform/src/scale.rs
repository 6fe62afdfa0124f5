//! Image downscaling by powers of two
//!
//! Provides the 2× reduction used to derive each pyramid level from the
//! one below it. The two spatial axes are halved; the channel axis is
//! left untouched.
//!
//! - Area mapping: each output sample is the mean of its 2×2 source
//!   block (a box filter, anti-aliased)
//! - Sampling: each output sample copies the top-left sample of its
//!   block (nearest neighbour, for label data where a mean has no meaning)
//!
//! An axis of odd length `n` produces `ceil(n / 2)` outputs; the last
//! block along that axis covers the single trailing row or column, so no
//! source data is dropped and nothing is invented.

use crate::TransformResult;
use lodtree_core::{Image, Sample};
use serde::{Deserialize, Serialize};

/// Downsampling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownsampleMethod {
    /// Area mapping (box filter, best for intensity images)
    #[default]
    Area,
    /// Nearest-neighbor sampling (keeps label values intact)
    Sampling,
}

/// Extent of an axis of length `n` after one 2× reduction
#[inline]
pub fn reduced_extent(n: usize) -> usize {
    n.div_ceil(2)
}

/// Halve both spatial axes of an image
///
/// # Arguments
/// * `image` - Input image
/// * `method` - Reduction algorithm to use
///
/// # Examples
///
/// ```
/// use lodtree_core::Image;
/// use lodtree_transform::{DownsampleMethod, downsample_2x};
///
/// let image = Image::from_fn(4, 4, 1, |r, _, _| (r * 10) as u8).unwrap();
/// let half = downsample_2x(&image, DownsampleMethod::Area).unwrap();
/// assert_eq!(half.shape(), (2, 2, 1));
/// assert_eq!(half.get(0, 0, 0), Some(5)); // mean of rows 0 and 10
/// ```
pub fn downsample_2x<T: Sample>(
    image: &Image<T>,
    method: DownsampleMethod,
) -> TransformResult<Image<T>> {
    match method {
        DownsampleMethod::Area => downsample_area(image),
        DownsampleMethod::Sampling => downsample_sampling(image),
    }
}

/// Apply `downsample_2x` repeatedly
///
/// `levels == 0` returns a copy of the input.
pub fn downsample_levels<T: Sample>(
    image: &Image<T>,
    levels: usize,
    method: DownsampleMethod,
) -> TransformResult<Image<T>> {
    let mut current = image.clone();
    for _ in 0..levels {
        current = downsample_2x(&current, method)?;
    }
    Ok(current)
}

fn downsample_area<T: Sample>(image: &Image<T>) -> TransformResult<Image<T>> {
    let (height, width, channels) = image.shape();
    let out_h = reduced_extent(height);
    let out_w = reduced_extent(width);
    let src = image.data();

    let mut data = Vec::with_capacity(out_h * out_w * channels);
    for oy in 0..out_h {
        let y0 = 2 * oy;
        let y1 = (y0 + 1).min(height - 1);
        for ox in 0..out_w {
            let x0 = 2 * ox;
            let x1 = (x0 + 1).min(width - 1);
            // Distinct source positions in this block (1, 2 or 4)
            let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as f64;
            for ch in 0..channels {
                let mut sum = 0.0;
                for y in y0..=y1 {
                    for x in x0..=x1 {
                        sum += src[(y * width + x) * channels + ch].to_f64();
                    }
                }
                data.push(T::from_f64(sum / count));
            }
        }
    }

    Ok(Image::from_data(out_h, out_w, channels, data)?)
}

fn downsample_sampling<T: Sample>(image: &Image<T>) -> TransformResult<Image<T>> {
    let (height, width, channels) = image.shape();
    let out_h = reduced_extent(height);
    let out_w = reduced_extent(width);
    let src = image.data();

    let mut data = Vec::with_capacity(out_h * out_w * channels);
    for oy in 0..out_h {
        for ox in 0..out_w {
            let start = ((2 * oy) * width + 2 * ox) * channels;
            data.extend_from_slice(&src[start..start + channels]);
        }
    }

    Ok(Image::from_data(out_h, out_w, channels, data)?)
}
