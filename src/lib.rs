//! # somtour - TSP tour approximation with a ring-topology SOM
//!
//! somtour approximates solutions to the Traveling Salesman Problem using a
//! Kohonen Self-Organizing Map: a ring of movable neurons is iteratively
//! pulled toward city coordinates until the ring traces an approximate tour
//! visiting all cities.
//!
//! ## Overview
//!
//! Each training iteration visits the next city in cyclic dataset order,
//! finds the nearest ring neuron under Manhattan distance (the winner), and
//! pulls the winner plus a shrinking neighborhood of ring indices toward the
//! city, scaled by a decaying learning rate. Snapshots of the (cities, ring)
//! state are rendered on a fixed iteration schedule.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use somtour::{load_dataset, Config, PngSnapshotter, Bounds, Trainer};
//!
//! let config = Config::default();
//! let cities = load_dataset(&config.dataset.name, &config.dataset.data_dir)?;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut trainer = Trainer::new(cities.clone(), &config.training, &mut rng)?;
//!
//! let bounds = Bounds::of(&cities)?;
//! let mut snapshotter = PngSnapshotter::new(config.snapshot, &bounds)?;
//! trainer.train(&mut snapshotter)?;
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dataset`] - City sets, coordinate bounds, named dataset loading
//! - [`som`] - Neuron ring, winner selection, decay schedules, the trainer
//! - [`snapshot`] - Snapshot rendering of training state
//! - [`config`] - Configuration surface with reference defaults

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod snapshot;
pub mod som;

// Re-export commonly used types
pub use config::{Config, DatasetConfig, SnapshotConfig, TrainingConfig};
pub use dataset::{load_dataset, Bounds, City};
pub use error::{Result, SomTourError};
pub use snapshot::{NullSnapshotter, PngSnapshotter, Snapshotter};
pub use som::{
    snapshot_due, ConstantDecay, DecaySpec, DecayStrategy, ExponentialDecay, LinearDecay, Neuron,
    NeuronRing, Trainer,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of ring neurons per city.
pub const DEFAULT_RING_SIZE_MULTIPLIER: usize = 4;

/// Default divisor applied to the city count for the initial radius.
pub const DEFAULT_RADIUS_DIVISOR: usize = 2;

/// Default iteration period between radius decrements.
pub const DEFAULT_RADIUS_DECAY_PERIOD: usize = 2_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants_match_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.ring_size_multiplier, DEFAULT_RING_SIZE_MULTIPLIER);
        assert_eq!(config.initial_radius_divisor, DEFAULT_RADIUS_DIVISOR);
        assert_eq!(config.radius_decay_period, DEFAULT_RADIUS_DECAY_PERIOD);
    }
}
