//! Image - dense height × width × channels buffer
//!
//! `Image` is the unit of data everywhere in the pyramid: the source
//! image, every tile, and every downsampled parent tile.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with channels innermost and no
//! padding. The sample at (row, col, channel) is at index
//! `(row * width + col) * channels + channel`.
//!
//! # Examples
//!
//! ```
//! use lodtree_core::Image;
//!
//! let mut image = Image::<u8>::new(64, 48, 3).unwrap();
//! image.set(10, 20, 1, 200).unwrap();
//! assert_eq!(image.get(10, 20, 1), Some(200));
//! assert_eq!(image.pixel(10, 20), Some(&[0, 200, 0][..]));
//! ```

mod extract;
mod stack;

pub use stack::{hstack, vstack};

use crate::array::element_count;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Number of axes in an image: two spatial axes plus channels.
pub const IMAGE_RANK: usize = 3;

/// Dense row-major image of `Sample` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    /// Rows
    height: usize,
    /// Columns
    width: usize,
    /// Samples per pixel
    channels: usize,
    /// Sample data (row-major, channels innermost)
    data: Vec<T>,
}

impl<T: Sample> Image<T> {
    /// Create an image with every sample set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any extent is 0 or the sample
    /// count overflows.
    pub fn new(height: usize, width: usize, channels: usize) -> Result<Self> {
        Self::new_with_value(height, width, channels, T::default())
    }

    /// Create an image with every sample set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any extent is 0.
    pub fn new_with_value(height: usize, width: usize, channels: usize, value: T) -> Result<Self> {
        check_dimensions(height, width, channels)?;
        Ok(Image {
            height,
            width,
            channels,
            data: vec![value; height * width * channels],
        })
    }

    /// Create an image from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if an extent is 0 or the data length doesn't match.
    pub fn from_data(height: usize, width: usize, channels: usize, data: Vec<T>) -> Result<Self> {
        check_dimensions(height, width, channels)?;
        if data.len() != height * width * channels {
            return Err(Error::DataLengthMismatch {
                len: data.len(),
                shape: vec![height, width, channels],
            });
        }
        Ok(Image {
            height,
            width,
            channels,
            data,
        })
    }

    /// Create an image by evaluating `f(row, col, channel)` for every sample
    pub fn from_fn<F>(height: usize, width: usize, channels: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        check_dimensions(height, width, channels)?;
        let mut data = Vec::with_capacity(height * width * channels);
        for row in 0..height {
            for col in 0..width {
                for ch in 0..channels {
                    data.push(f(row, col, ch));
                }
            }
        }
        Ok(Image {
            height,
            width,
            channels,
            data,
        })
    }

    /// Get the height (number of rows)
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the width (number of columns)
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the shape as `(height, width, channels)`
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Total number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; an image has at least one sample
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw sample data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the image and return its sample buffer
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Samples of one row (`width * channels` values)
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }
        let stride = self.width * self.channels;
        Some(&self.data[row * stride..(row + 1) * stride])
    }

    /// All channels of one pixel
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[T]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = (row * self.width + col) * self.channels;
        Some(&self.data[start..start + self.channels])
    }

    /// Get one sample, or `None` if out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<T> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }
        Some(self.get_unchecked(row, col, channel))
    }

    /// Get one sample without bounds checking beyond the slice index
    #[inline]
    pub fn get_unchecked(&self, row: usize, col: usize, channel: usize) -> T {
        self.data[self.offset(row, col, channel)]
    }

    /// Set one sample
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if any coordinate is out of range.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: T) -> Result<()> {
        if row >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.height,
            });
        }
        if col >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: col,
                len: self.width,
            });
        }
        if channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.channels,
            });
        }
        let offset = self.offset(row, col, channel);
        self.data[offset] = value;
        Ok(())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }
}

/// Reject zero extents and shapes whose sample count overflows `usize`.
fn check_dimensions(height: usize, width: usize, channels: usize) -> Result<()> {
    if height == 0
        || width == 0
        || channels == 0
        || element_count(&[height, width, channels]).is_none()
    {
        return Err(Error::InvalidDimension {
            height,
            width,
            channels,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let image = Image::<u8>::new(4, 5, 3).unwrap();
        assert_eq!(image.shape(), (4, 5, 3));
        assert_eq!(image.len(), 60);
        assert!(image.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_zero_extent() {
        assert!(Image::<u8>::new(0, 5, 3).is_err());
        assert!(Image::<u8>::new(5, 0, 3).is_err());
        assert!(Image::<u8>::new(5, 5, 0).is_err());
    }

    #[test]
    fn test_from_fn_layout() {
        let image = Image::from_fn(2, 3, 2, |r, c, ch| (r * 100 + c * 10 + ch) as u16).unwrap();
        assert_eq!(image.get(1, 2, 1), Some(121));
        assert_eq!(image.data()[0..4], [0, 1, 10, 11]);
        assert_eq!(image.row(1).unwrap()[0], 100);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut image = Image::<f32>::new(3, 3, 1).unwrap();
        image.set(2, 2, 0, 1.5).unwrap();
        assert_eq!(image.get(2, 2, 0), Some(1.5));
        assert_eq!(image.get(3, 0, 0), None);
        assert!(image.set(0, 3, 0, 1.0).is_err());
        assert!(image.set(0, 0, 1, 1.0).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            Image::<u8>::new(usize::MAX / 2, 3, 1),
            Err(Error::InvalidDimension { width: 3, .. })
        ));
        assert!(Image::from_data(usize::MAX / 2, 3, 1, Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        assert!(matches!(
            Image::from_data(2, 2, 1, vec![0u8; 3]),
            Err(Error::DataLengthMismatch { len: 3, .. })
        ));
    }
}
