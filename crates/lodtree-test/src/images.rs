//! Synthetic test images
//!
//! Regression tests build their inputs instead of loading files. Each
//! factory names its images from its own counter, so two tests running
//! in parallel never race on a shared name sequence.

use crate::error::{TestError, TestResult};
use lodtree_core::{Image, NdArray};

/// A generated image with a stable name for failure reports.
#[derive(Debug, Clone)]
pub struct NamedImage<T> {
    pub name: String,
    pub image: Image<T>,
}

impl<T: lodtree_core::Sample> NamedImage<T> {
    /// Convert into the raw array form accepted by `Octree::build`.
    pub fn into_array(self) -> NdArray<T> {
        NdArray::from(self.image)
    }
}

/// Creates named synthetic images.
///
/// # Examples
///
/// ```
/// use lodtree_test::TestImageFactory;
///
/// let mut factory = TestImageFactory::new("tiles");
/// let a = factory.gradient(8, 8, 3).unwrap();
/// let b = factory.gradient(8, 8, 3).unwrap();
/// assert_eq!(a.name, "tiles-0");
/// assert_eq!(b.name, "tiles-1");
/// ```
#[derive(Debug, Clone)]
pub struct TestImageFactory {
    prefix: String,
    next_id: u64,
}

impl TestImageFactory {
    /// Create a factory whose names start with `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self::with_start(prefix, 0)
    }

    /// Create a factory whose counter starts at `start`.
    pub fn with_start(prefix: &str, start: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            next_id: start,
        }
    }

    /// Return the next image name and advance the counter.
    pub fn next_name(&mut self) -> String {
        let name = format!("{}-{}", self.prefix, self.next_id);
        self.next_id += 1;
        name
    }

    /// Diagonal 8-bit gradient; each channel is offset so channels differ.
    pub fn gradient(
        &mut self,
        height: usize,
        width: usize,
        channels: usize,
    ) -> TestResult<NamedImage<u8>> {
        self.build(height, width, channels, |r, c, ch| {
            ((r + c + ch * 37) % 256) as u8
        })
    }

    /// Image whose every sample encodes its own position, unique up to
    /// 2^32 samples. Useful for checking tile layout exactly.
    pub fn coordinates(
        &mut self,
        height: usize,
        width: usize,
        channels: usize,
    ) -> TestResult<NamedImage<u32>> {
        self.build(height, width, channels, |r, c, ch| {
            ((r * width + c) * channels + ch) as u32
        })
    }

    /// Checkerboard of `square`-pixel cells alternating 0.0 and 1.0.
    pub fn checkerboard(
        &mut self,
        height: usize,
        width: usize,
        channels: usize,
        square: usize,
    ) -> TestResult<NamedImage<f32>> {
        let square = square.max(1);
        self.build(height, width, channels, |r, c, _| {
            if (r / square + c / square) % 2 == 0 {
                0.0
            } else {
                1.0
            }
        })
    }

    /// Image with every sample set to `value`.
    pub fn constant(
        &mut self,
        height: usize,
        width: usize,
        channels: usize,
        value: u8,
    ) -> TestResult<NamedImage<u8>> {
        self.build(height, width, channels, |_, _, _| value)
    }

    fn build<T, F>(
        &mut self,
        height: usize,
        width: usize,
        channels: usize,
        f: F,
    ) -> TestResult<NamedImage<T>>
    where
        T: lodtree_core::Sample,
        F: FnMut(usize, usize, usize) -> T,
    {
        let name = self.next_name();
        let image = Image::from_fn(height, width, channels, f).map_err(|source| {
            TestError::ImageCreate {
                name: name.clone(),
                source,
            }
        })?;
        Ok(NamedImage { name, image })
    }
}
