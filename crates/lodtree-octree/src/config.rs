//! Octree build configuration
//!
//! `OctreeConfig` collects every knob of a pyramid build. It can be
//! created in code with the `with_*` builders, or loaded from a small
//! JSON file, optionally named by the `LODTREE_CONFIG` environment
//! variable. Missing fields take their defaults:
//!
//! ```json
//! {
//!     "tile_size": 256,
//!     "odd_grid": "merge_partial",
//!     "downsample": "area",
//!     "num_workers": 6,
//!     "force_synchronous": false,
//!     "delay_queue_ms": 100
//! }
//! ```

use std::env::VarError;
use std::path::Path;
use std::time::Duration;

use lodtree_transform::DownsampleMethod;
use serde::{Deserialize, Serialize};

use crate::error::{OctreeError, OctreeResult};
use crate::pyramid::OddGridPolicy;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: usize = 64;

/// Default hold time of a chunk request before it is submitted, in
/// milliseconds.
pub const DEFAULT_DELAY_QUEUE_MS: u64 = 100;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "LODTREE_CONFIG";

/// Settings for building an [`Octree`](crate::Octree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OctreeConfig {
    /// Edge length of the square level-0 tiles.
    pub tile_size: usize,

    /// What to do when a tile grid has an odd row or column count.
    pub odd_grid: OddGridPolicy,

    /// How each merged 2×2 neighbourhood is reduced.
    pub downsample: DownsampleMethod,

    /// Dedicated worker count; `None` uses the global rayon pool.
    pub num_workers: Option<usize>,

    /// Build with a single worker, one tile at a time.
    pub force_synchronous: bool,

    /// How long a chunk request waits before it is submitted for loading.
    /// Zero submits immediately.
    pub delay_queue_ms: u64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            odd_grid: OddGridPolicy::default(),
            downsample: DownsampleMethod::default(),
            num_workers: None,
            force_synchronous: false,
            delay_queue_ms: DEFAULT_DELAY_QUEUE_MS,
        }
    }
}

impl OctreeConfig {
    /// Set the tile edge length.
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the odd tile grid policy.
    pub fn with_odd_grid(mut self, policy: OddGridPolicy) -> Self {
        self.odd_grid = policy;
        self
    }

    /// Set the downsampling method.
    pub fn with_downsample(mut self, method: DownsampleMethod) -> Self {
        self.downsample = method;
        self
    }

    /// Use a dedicated pool of `num_workers` threads.
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    /// Build on a single worker.
    pub fn synchronous(mut self) -> Self {
        self.force_synchronous = true;
        self
    }

    /// Set the chunk request delay in milliseconds.
    pub fn with_delay_queue_ms(mut self, delay_queue_ms: u64) -> Self {
        self.delay_queue_ms = delay_queue_ms;
        self
    }

    /// The chunk request delay as a `Duration`.
    pub fn delay_queue_delay(&self) -> Duration {
        Duration::from_millis(self.delay_queue_ms)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// - `OctreeError::InvalidInput` if `tile_size` is 0
    /// - `OctreeError::Config` if `num_workers` is `Some(0)`
    pub fn validate(&self) -> OctreeResult<()> {
        if self.tile_size == 0 {
            return Err(OctreeError::InvalidInput(
                "tile size must be positive".to_string(),
            ));
        }
        if self.num_workers == Some(0) {
            return Err(OctreeError::Config(
                "num_workers must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads a dedicated pool should have, or `None`
    /// to run on the global pool.
    pub fn worker_threads(&self) -> Option<usize> {
        if self.force_synchronous {
            Some(1)
        } else {
            self.num_workers
        }
    }

    /// Parse a JSON config document and validate it.
    pub fn from_json_str(json: &str) -> OctreeResult<Self> {
        let config: OctreeConfig =
            serde_json::from_str(json).map_err(|e| OctreeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::Config` if the file does not exist or does not
    /// parse, and `OctreeError::Io` for other read failures.
    pub fn load(path: impl AsRef<Path>) -> OctreeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OctreeError::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load the config file named by `LODTREE_CONFIG`, or the defaults if
    /// the variable is unset or empty.
    ///
    /// # Errors
    ///
    /// Returns `OctreeError::Config` naming the variable if its value is
    /// not valid UTF-8 or the file it names cannot be loaded.
    pub fn from_env() -> OctreeResult<Self> {
        Self::from_env_value(std::env::var(CONFIG_ENV_VAR))
    }

    fn from_env_value(value: Result<String, VarError>) -> OctreeResult<Self> {
        let path = match value {
            Err(VarError::NotPresent) => return Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => {
                return Err(OctreeError::Config(format!(
                    "{} is not valid UTF-8",
                    CONFIG_ENV_VAR
                )));
            }
            Ok(path) if path.is_empty() => return Ok(Self::default()),
            Ok(path) => path,
        };
        Self::load(&path).map_err(|err| match err {
            OctreeError::Config(msg) => {
                OctreeError::Config(format!("{}={}: {}", CONFIG_ENV_VAR, path, msg))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OctreeConfig::default();
        assert_eq!(config.tile_size, 64);
        assert_eq!(config.odd_grid, OddGridPolicy::MergePartial);
        assert_eq!(config.downsample, DownsampleMethod::Area);
        assert_eq!(config.worker_threads(), None);
        assert_eq!(config.delay_queue_ms, 100);
        assert_eq!(config.delay_queue_delay(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = OctreeConfig::default()
            .with_tile_size(256)
            .with_odd_grid(OddGridPolicy::Error)
            .with_downsample(DownsampleMethod::Sampling)
            .with_num_workers(4)
            .with_delay_queue_ms(0);
        assert_eq!(config.tile_size, 256);
        assert!(config.delay_queue_delay().is_zero());
        assert_eq!(config.worker_threads(), Some(4));
        assert_eq!(config.synchronous().worker_threads(), Some(1));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(matches!(
            OctreeConfig::default().with_tile_size(0).validate(),
            Err(OctreeError::InvalidInput(_))
        ));
        assert!(matches!(
            OctreeConfig::default().with_num_workers(0).validate(),
            Err(OctreeError::Config(_))
        ));
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = OctreeConfig::from_json_str(r#"{"tile_size": 128}"#).unwrap();
        assert_eq!(config.tile_size, 128);
        assert_eq!(config.num_workers, None);
        assert!(!config.force_synchronous);
        assert_eq!(config.delay_queue_ms, DEFAULT_DELAY_QUEUE_MS);
    }

    #[test]
    fn test_json_delay_queue() {
        let config = OctreeConfig::from_json_str(r#"{"delay_queue_ms": 250}"#).unwrap();
        assert_eq!(config.delay_queue_delay(), Duration::from_millis(250));
        assert!(OctreeConfig::from_json_str(r#"{"delay_queue_ms": -1}"#).is_err());
    }

    #[test]
    fn test_json_enums() {
        let config = OctreeConfig::from_json_str(
            r#"{"odd_grid": "error", "downsample": "sampling", "force_synchronous": true}"#,
        )
        .unwrap();
        assert_eq!(config.odd_grid, OddGridPolicy::Error);
        assert_eq!(config.downsample, DownsampleMethod::Sampling);
        assert!(config.force_synchronous);
    }

    #[test]
    fn test_json_unknown_field_rejected() {
        assert!(OctreeConfig::from_json_str(r#"{"tile_sise": 128}"#).is_err());
    }

    #[test]
    fn test_json_invalid_value_rejected() {
        assert!(matches!(
            OctreeConfig::from_json_str(r#"{"tile_size": 0}"#),
            Err(OctreeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_env_value_unset_is_default() {
        assert_eq!(
            OctreeConfig::from_env_value(Err(VarError::NotPresent)).unwrap(),
            OctreeConfig::default()
        );
        assert_eq!(
            OctreeConfig::from_env_value(Ok(String::new())).unwrap(),
            OctreeConfig::default()
        );
    }

    #[test]
    fn test_env_value_not_unicode_is_config_error() {
        let value = Err(VarError::NotUnicode(std::ffi::OsString::from("lodtree.json")));
        match OctreeConfig::from_env_value(value) {
            Err(OctreeError::Config(msg)) => assert!(msg.contains("LODTREE_CONFIG"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_env_value_missing_file_names_variable() {
        let value = Ok("/nonexistent/lodtree.json".to_string());
        let err = OctreeConfig::from_env_value(value).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("LODTREE_CONFIG=/nonexistent/lodtree.json"), "{msg}");
    }
}
