//! Configuration for the somtour engine.

use crate::error::{Result, SomTourError};
use crate::som::DecaySpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a tour-approximation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset selection.
    pub dataset: DatasetConfig,

    /// Training-loop configuration.
    pub training: TrainingConfig,

    /// Snapshot rendering configuration.
    pub snapshot: SnapshotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            training: TrainingConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Config {
    /// Validates every section, failing fast before any training iteration.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.snapshot.validate()
    }
}

/// Which city set to load, and from where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Name of the stored city set.
    /// Default: "western_sahara".
    pub name: String,

    /// Directory searched for dataset files.
    /// Default: "data".
    pub data_dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: "western_sahara".to_string(),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Training-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training iterations.
    /// Default: 25,000.
    pub iterations: usize,

    /// Learning-rate schedule.
    /// Default: exponential, initial 0.8, factor 0.9999.
    pub learning_rate: DecaySpec,

    /// Ring neurons per city.
    /// Default: 4.
    pub ring_size_multiplier: usize,

    /// Divisor applied to the city count for the initial neighborhood radius.
    /// Default: 2.
    pub initial_radius_divisor: usize,

    /// Iteration period between radius decrements.
    /// Default: 2,000.
    pub radius_decay_period: usize,

    /// Padding applied to the dataset bounding box before ring
    /// initialization, as a fraction of each axis extent per side.
    /// Default: 0.0.
    pub bounds_padding: f64,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: 25_000,
            learning_rate: DecaySpec::default(),
            ring_size_multiplier: 4,
            initial_radius_divisor: 2,
            radius_decay_period: 2_000,
            bounds_padding: 0.0,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Returns the ring size for a dataset of `city_count` cities.
    #[inline]
    pub fn ring_size(&self, city_count: usize) -> usize {
        self.ring_size_multiplier * city_count
    }

    /// Returns the initial neighborhood radius for a dataset of
    /// `city_count` cities.
    #[inline]
    pub fn initial_radius(&self, city_count: usize) -> i64 {
        (city_count / self.initial_radius_divisor) as i64
    }

    /// Rejects configurations that cannot produce a valid trainer.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SomTourError::Config(
                "iterations must be positive".to_string(),
            ));
        }
        if self.ring_size_multiplier == 0 {
            return Err(SomTourError::Config(
                "ring_size_multiplier must be positive".to_string(),
            ));
        }
        if self.initial_radius_divisor == 0 {
            return Err(SomTourError::Config(
                "initial_radius_divisor must be positive".to_string(),
            ));
        }
        if self.radius_decay_period == 0 {
            return Err(SomTourError::Config(
                "radius_decay_period must be positive".to_string(),
            ));
        }
        if self.bounds_padding < 0.0 {
            return Err(SomTourError::Config(
                "bounds_padding must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Snapshot rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Directory receiving the rendered frames.
    /// Default: "snapshots".
    pub output_dir: PathBuf,

    /// Frame width in pixels.
    /// Default: 800.
    pub width: u32,

    /// Frame height in pixels.
    /// Default: 800.
    pub height: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("snapshots"),
            width: 800,
            height: 800,
        }
    }
}

impl SnapshotConfig {
    /// Rejects frame dimensions that cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SomTourError::Config(
                "snapshot dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dataset.name, "western_sahara");
        assert_eq!(config.training.iterations, 25_000);
        assert_eq!(config.training.ring_size_multiplier, 4);
        assert_eq!(config.training.radius_decay_period, 2_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_sizes() {
        let config = TrainingConfig::default();
        assert_eq!(config.ring_size(29), 116);
        assert_eq!(config.initial_radius(29), 14);
        assert_eq!(config.initial_radius(1), 0);
    }

    #[test]
    fn test_validation_rejects_zero_iterations() {
        let config = TrainingConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_multiplier() {
        let config = TrainingConfig {
            ring_size_multiplier: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_divisor() {
        let config = TrainingConfig {
            initial_radius_divisor: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_period() {
        let config = TrainingConfig {
            radius_decay_period: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_frame() {
        let config = SnapshotConfig {
            width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
