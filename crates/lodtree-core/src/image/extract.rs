//! Rectangular region extraction

use super::Image;
use crate::error::{Error, Result};
use crate::sample::Sample;

impl<T: Sample> Image<T> {
    /// Extract a rectangular sub-region from the image.
    ///
    /// Creates a new image containing the rows `row..row + height` and the
    /// columns `col..col + width`, with every channel. If the rectangle
    /// extends beyond the image bounds, it is clipped to the valid region.
    /// Returns an error if the rectangle is entirely outside the image.
    ///
    /// # Arguments
    ///
    /// * `row` - Top edge of the rectangle
    /// * `col` - Left edge of the rectangle
    /// * `height` - Number of rows requested
    /// * `width` - Number of columns requested
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The requested height or width is 0
    /// - The rectangle origin is outside the image bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use lodtree_core::Image;
    ///
    /// let image = Image::<u8>::new(100, 80, 3).unwrap();
    /// let region = image.clip_region(10, 20, 50, 40).unwrap();
    /// assert_eq!(region.shape(), (50, 40, 3));
    /// ```
    ///
    /// Regions extending beyond the image are clipped:
    ///
    /// ```
    /// use lodtree_core::Image;
    ///
    /// let image = Image::<u8>::new(100, 80, 1).unwrap();
    /// let region = image.clip_region(64, 64, 64, 64).unwrap();
    /// assert_eq!(region.height(), 36); // clipped: 100 - 64
    /// assert_eq!(region.width(), 16);  // clipped: 80 - 64
    /// ```
    pub fn clip_region(
        &self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<Image<T>> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip region has zero dimension: {}x{}",
                height, width
            )));
        }

        if row >= self.height || col >= self.width {
            return Err(Error::InvalidParameter(format!(
                "clip region origin ({}, {}) is outside image bounds ({}x{})",
                row, col, self.height, self.width
            )));
        }

        let clip_h = height.min(self.height - row);
        let clip_w = width.min(self.width - col);

        // Each clipped row is one contiguous run in the source
        let run = clip_w * self.channels;
        let mut data = Vec::with_capacity(clip_h * run);
        for r in row..row + clip_h {
            let start = (r * self.width + col) * self.channels;
            data.extend_from_slice(&self.data[start..start + run]);
        }

        Image::from_data(clip_h, clip_w, self.channels, data)
    }
}
