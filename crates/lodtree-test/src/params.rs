//! Regression test parameters and operations

use lodtree_core::{Image, Sample};

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status. Every comparison
/// bumps the index so a failure report names the check that failed.
pub struct RegParams {
    /// Name of the test (e.g., "octree")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "pyramid")
    ///
    /// Installs the test log subscriber on first use so `tracing` output
    /// from the code under test is captured per test.
    pub fn new(test_name: &str) -> Self {
        crate::init_test_logging();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two image shapes
    pub fn compare_shapes(
        &mut self,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    ) -> bool {
        self.index += 1;
        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: shape comparison for index {} - expected {:?}, got {:?}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg);
            return false;
        }
        true
    }

    /// Compare two images for exact equality
    ///
    /// # Returns
    ///
    /// `true` if shapes and every sample match, `false` otherwise.
    pub fn compare_images<T: Sample>(&mut self, image1: &Image<T>, image2: &Image<T>) -> bool {
        self.index += 1;

        if image1.shape() != image2.shape() {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - shape mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                image1.shape(),
                image2.shape()
            );
            self.fail(msg);
            return false;
        }

        let (height, width, channels) = image1.shape();
        for row in 0..height {
            for col in 0..width {
                for ch in 0..channels {
                    let v1 = image1.get_unchecked(row, col, ch);
                    let v2 = image2.get_unchecked(row, col, ch);
                    if v1 != v2 {
                        let msg = format!(
                            "Failure in {}_reg: image comparison for index {} - sample mismatch at ({}, {}, {}): {:?} vs {:?}",
                            self.test_name, self.index, row, col, ch, v1, v2
                        );
                        self.fail(msg);
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Clean up and return the overall success status
    ///
    /// Prints a summary and returns `true` if all tests passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
