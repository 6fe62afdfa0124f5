//! lodtree-test - Regression test framework for lodtree
//!
//! This crate provides the shared tooling used by every crate's
//! `tests/*_reg.rs` integration tests:
//!
//! - [`RegParams`] - counts checks and collects failures so one test can
//!   report every mismatch instead of stopping at the first
//! - [`TestImageFactory`] - synthetic, named input images
//!
//! # Usage
//!
//! ```
//! use lodtree_test::{RegParams, TestImageFactory};
//!
//! let mut rp = RegParams::new("example");
//! let mut factory = TestImageFactory::new("example");
//! let named = factory.gradient(16, 16, 3).unwrap();
//! rp.compare_shapes((16, 16, 3), named.image.shape());
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter for log output from the code under test
//!   (for example `RUST_LOG=lodtree_octree=debug`)

mod error;
mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{NamedImage, TestImageFactory};
pub use params::RegParams;

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber writing through the test harness.
///
/// Safe to call repeatedly; only the first call in a process installs.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
