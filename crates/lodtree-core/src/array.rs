//! NdArray - owned N-dimensional array
//!
//! `NdArray` is the raw input handed over by a reader or viewer: a flat
//! row-major buffer plus a shape of arbitrary rank. Converting it into an
//! [`Image`] is where rank and extent are validated.
//!
//! # Examples
//!
//! ```
//! use lodtree_core::{Image, NdArray};
//!
//! let array = NdArray::from_shape_vec(vec![2, 3, 1], vec![0u8; 6]).unwrap();
//! let image = Image::try_from(array).unwrap();
//! assert_eq!(image.shape(), (2, 3, 1));
//!
//! let flat = NdArray::from_shape_vec(vec![6], vec![0u8; 6]).unwrap();
//! assert!(Image::try_from(flat).is_err());
//! ```

use crate::error::{Error, Result};
use crate::image::{IMAGE_RANK, Image};
use crate::sample::Sample;

/// Owned row-major array of any rank.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Sample> NdArray<T> {
    /// Create an array filled with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeOverflow` if the element count does not fit in
    /// `usize`.
    pub fn zeros(shape: Vec<usize>) -> Result<Self> {
        let len = element_count(&shape).ok_or_else(|| Error::ShapeOverflow {
            shape: shape.clone(),
        })?;
        Ok(NdArray {
            shape,
            data: vec![T::default(); len],
        })
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// - `Error::ShapeOverflow` if the product of `shape` does not fit in
    ///   `usize`
    /// - `Error::DataLengthMismatch` if `data.len()` is not the product of
    ///   `shape`
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
        let Some(expected) = element_count(&shape) else {
            return Err(Error::ShapeOverflow { shape });
        };
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                len: data.len(),
                shape,
            });
        }
        Ok(NdArray { shape, data })
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent along each dimension.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat row-major data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Validate this array as an image and return its `(height, width,
    /// channels)` without consuming it.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidRank` if the rank is not 3
    /// - `Error::InvalidDimension` if any extent is zero or the element
    ///   count overflows
    pub fn image_shape(&self) -> Result<(usize, usize, usize)> {
        if self.shape.len() != IMAGE_RANK {
            return Err(Error::InvalidRank {
                expected: IMAGE_RANK,
                actual: self.shape.len(),
            });
        }
        let (height, width, channels) = (self.shape[0], self.shape[1], self.shape[2]);
        if height == 0 || width == 0 || channels == 0 || element_count(&self.shape).is_none() {
            return Err(Error::InvalidDimension {
                height,
                width,
                channels,
            });
        }
        Ok((height, width, channels))
    }

    /// Split into shape and data.
    pub fn into_raw(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }
}

/// Number of elements in an array of `shape`, or `None` on overflow.
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
}

impl<T: Sample> TryFrom<NdArray<T>> for Image<T> {
    type Error = Error;

    fn try_from(array: NdArray<T>) -> Result<Self> {
        let (height, width, channels) = array.image_shape()?;
        Image::from_data(height, width, channels, array.data)
    }
}

impl<T: Sample> From<Image<T>> for NdArray<T> {
    fn from(image: Image<T>) -> Self {
        let (height, width, channels) = image.shape();
        NdArray {
            shape: vec![height, width, channels],
            data: image.into_data(),
        }
    }
}
