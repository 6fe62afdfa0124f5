//! Horizontal and vertical stacking
//!
//! `hstack` joins images left to right (they must share height and
//! channel count); `vstack` joins them top to bottom (they must share
//! width and channel count). Together they reassemble a 2×2 tile
//! neighbourhood, or a whole tile grid, into one image.

use super::Image;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Join images left to right.
///
/// # Errors
///
/// - `Error::NullInput` if `images` is empty
/// - `Error::IncompatibleSizes` if heights or channel counts differ
///
/// # Examples
///
/// ```
/// use lodtree_core::{Image, hstack};
///
/// let left = Image::<u8>::new_with_value(4, 3, 1, 1).unwrap();
/// let right = Image::<u8>::new_with_value(4, 2, 1, 2).unwrap();
/// let joined = hstack(&[&left, &right]).unwrap();
/// assert_eq!(joined.shape(), (4, 5, 1));
/// assert_eq!(joined.get(0, 3, 0), Some(2));
/// ```
pub fn hstack<T: Sample>(images: &[&Image<T>]) -> Result<Image<T>> {
    let first = images.first().ok_or(Error::NullInput("hstack images"))?;
    let (height, _, channels) = first.shape();

    for image in &images[1..] {
        if image.height() != height || image.channels() != channels {
            return Err(Error::IncompatibleSizes {
                axis: "horizontal",
                first: first.shape(),
                second: image.shape(),
            });
        }
    }

    let width: usize = images.iter().map(|image| image.width()).sum();
    let mut data = Vec::with_capacity(height * width * channels);
    for row in 0..height {
        for image in images {
            let stride = image.width() * channels;
            data.extend_from_slice(&image.data()[row * stride..(row + 1) * stride]);
        }
    }

    Image::from_data(height, width, channels, data)
}

/// Join images top to bottom.
///
/// # Errors
///
/// - `Error::NullInput` if `images` is empty
/// - `Error::IncompatibleSizes` if widths or channel counts differ
pub fn vstack<T: Sample>(images: &[&Image<T>]) -> Result<Image<T>> {
    let first = images.first().ok_or(Error::NullInput("vstack images"))?;
    let (_, width, channels) = first.shape();

    for image in &images[1..] {
        if image.width() != width || image.channels() != channels {
            return Err(Error::IncompatibleSizes {
                axis: "vertical",
                first: first.shape(),
                second: image.shape(),
            });
        }
    }

    // Row-major storage makes vertical concatenation a plain append
    let height: usize = images.iter().map(|image| image.height()).sum();
    let mut data = Vec::with_capacity(height * width * channels);
    for image in images {
        data.extend_from_slice(image.data());
    }

    Image::from_data(height, width, channels, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(height: usize, width: usize, value: u8) -> Image<u8> {
        Image::new_with_value(height, width, 2, value).unwrap()
    }

    #[test]
    fn test_hstack_order() {
        let a = filled(2, 1, 1);
        let b = filled(2, 3, 2);
        let joined = hstack(&[&a, &b]).unwrap();
        assert_eq!(joined.shape(), (2, 4, 2));
        assert_eq!(joined.pixel(1, 0), Some(&[1u8, 1][..]));
        assert_eq!(joined.pixel(1, 1), Some(&[2u8, 2][..]));
    }

    #[test]
    fn test_vstack_order() {
        let a = filled(1, 3, 1);
        let b = filled(2, 3, 2);
        let joined = vstack(&[&a, &b]).unwrap();
        assert_eq!(joined.shape(), (3, 3, 2));
        assert_eq!(joined.get(0, 2, 1), Some(1));
        assert_eq!(joined.get(1, 0, 0), Some(2));
    }

    #[test]
    fn test_hstack_height_mismatch() {
        let a = filled(2, 1, 0);
        let b = filled(3, 1, 0);
        assert!(matches!(
            hstack(&[&a, &b]),
            Err(Error::IncompatibleSizes {
                axis: "horizontal",
                ..
            })
        ));
    }

    #[test]
    fn test_vstack_channel_mismatch() {
        let a = filled(2, 2, 0);
        let b = Image::<u8>::new(2, 2, 3).unwrap();
        assert!(vstack(&[&a, &b]).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            hstack::<u8>(&[]),
            Err(Error::NullInput(_))
        ));
        assert!(vstack::<u8>(&[]).is_err());
    }

    #[test]
    fn test_single_image_is_identity() {
        let a = filled(3, 2, 7);
        assert_eq!(hstack(&[&a]).unwrap(), a);
        assert_eq!(vstack(&[&a]).unwrap(), a);
    }
}
