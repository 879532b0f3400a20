//! The training loop that pulls the neuron ring toward the cities.

use crate::config::TrainingConfig;
use crate::dataset::{Bounds, City};
use crate::error::{Result, SomTourError};
use crate::snapshot::Snapshotter;
use crate::som::{winner, DecayStrategy, NeuronRing};
use log::info;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Iteration interval for snapshots during the early phase.
pub const EARLY_SNAPSHOT_INTERVAL: usize = 250;

/// First iteration (exclusive bound) past the early snapshot phase.
pub const EARLY_PHASE_END: usize = 10_000;

/// Iteration interval for snapshots after the early phase.
pub const LATE_SNAPSHOT_INTERVAL: usize = 2_500;

/// Whether the snapshot schedule fires at `iteration`.
///
/// Fires every 250 iterations below 10,000 and every 2,500 iterations
/// overall; the two conditions are OR-ed, so overlapping multiples fire once.
/// The final-iteration snapshot is handled separately by the trainer.
pub fn snapshot_due(iteration: usize) -> bool {
    (iteration < EARLY_PHASE_END && iteration % EARLY_SNAPSHOT_INTERVAL == 0)
        || iteration % LATE_SNAPSHOT_INTERVAL == 0
}

/// Drives the iteration loop of the ring SOM.
///
/// The trainer owns the ring, the learning-rate schedule, the shrinking
/// neighborhood radius, and the iteration counter, so a single [`step`] can
/// be exercised in isolation.
///
/// [`step`]: Trainer::step
pub struct Trainer {
    dataset: Vec<City>,
    ring: NeuronRing,
    learning_rate: Box<dyn DecayStrategy>,
    iterations: usize,
    radius: i64,
    radius_decay_period: usize,
    iteration: usize,
}

impl std::fmt::Debug for Trainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("dataset", &self.dataset)
            .field("ring", &self.ring)
            .field("learning_rate", &"<dyn DecayStrategy>")
            .field("iterations", &self.iterations)
            .field("radius", &self.radius)
            .field("radius_decay_period", &self.radius_decay_period)
            .field("iteration", &self.iteration)
            .finish()
    }
}

impl Trainer {
    /// Creates a trainer with a freshly initialized ring.
    ///
    /// The ring holds `ring_size_multiplier × |dataset|` neurons drawn
    /// uniformly from the dataset's (optionally padded) bounding box using
    /// the injected RNG. Fails fast on an empty dataset or an invalid
    /// configuration; no training iteration runs after a setup error.
    pub fn new<R: Rng>(dataset: Vec<City>, config: &TrainingConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(SomTourError::EmptyInput(
                "cannot train on an empty dataset".to_string(),
            ));
        }

        let bounds = Bounds::of(&dataset)?.padded(config.bounds_padding);
        let ring = NeuronRing::initialize(config.ring_size(dataset.len()), &bounds, rng)?;
        Self::from_parts(dataset, ring, config)
    }

    /// Assembles a trainer around an already-initialized ring.
    ///
    /// The same setup checks as [`Trainer::new`] apply; a zero-length ring is
    /// rejected here rather than surfacing later from winner selection.
    pub fn from_parts(
        dataset: Vec<City>,
        ring: NeuronRing,
        config: &TrainingConfig,
    ) -> Result<Self> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(SomTourError::EmptyInput(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        if ring.is_empty() {
            return Err(SomTourError::Config(
                "ring size must be positive".to_string(),
            ));
        }

        Ok(Self {
            radius: config.initial_radius(dataset.len()),
            dataset,
            ring,
            learning_rate: config.learning_rate.build(),
            iterations: config.iterations,
            radius_decay_period: config.radius_decay_period,
            iteration: 0,
        })
    }

    /// One training iteration.
    ///
    /// Visits the next city in cyclic dataset order (`dataset[i mod len]`,
    /// not random sampling), pulls the winner and its neighborhood toward it,
    /// then advances the radius and learning-rate schedules.
    ///
    /// The neighborhood is the half-open offset interval `[-radius, radius)`.
    /// For a non-positive radius that interval is empty, so the step mutates
    /// no neuron and only the schedules advance. The asymmetry and the
    /// degenerate case both come from the reference schedule and must not be
    /// "corrected": widening the interval changes training dynamics.
    pub fn step(&mut self) -> Result<()> {
        let city = self.dataset[self.iteration % self.dataset.len()];
        let winner = winner::select(city, &self.ring)? as i64;
        let rate = self.learning_rate.current();

        for j in -self.radius..self.radius {
            let influence = 2.0 / (j.abs() as f64 + 1.0);
            self.ring.get_mut(winner + j).update(city, rate, influence);
        }

        if self.iteration % self.radius_decay_period == 0 {
            self.radius -= 1;
        }
        self.learning_rate.advance();
        self.iteration += 1;
        Ok(())
    }

    /// Runs the configured number of iterations, snapshotting on schedule.
    pub fn train(&mut self, snapshotter: &mut dyn Snapshotter) -> Result<()> {
        let cancel = AtomicBool::new(false);
        self.train_with_progress(snapshotter, &cancel, |_| {})
    }

    /// Runs the full loop, reporting each finished iteration to `progress`
    /// and checking `cancel` between iterations.
    ///
    /// Snapshots fire per [`snapshot_due`], plus once after the final
    /// iteration regardless of schedule alignment. Cancellation stops cleanly
    /// between iterations without the trailing snapshot; the partially
    /// trained ring stays available through [`Trainer::ring`]. Failures from
    /// winner selection or the snapshotter propagate immediately and abort
    /// training.
    pub fn train_with_progress<F>(
        &mut self,
        snapshotter: &mut dyn Snapshotter,
        cancel: &AtomicBool,
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(usize),
    {
        info!(
            "Training ring: {} cities, {} neurons, {} iterations, initial radius {}",
            self.dataset.len(),
            self.ring.len(),
            self.iterations,
            self.radius
        );

        while self.iteration < self.iterations {
            if cancel.load(Ordering::Relaxed) {
                info!("Training cancelled at iteration {}", self.iteration);
                return Ok(());
            }

            let index = self.iteration;
            self.step()?;
            if snapshot_due(index) {
                snapshotter.snapshot(&self.dataset, &self.ring, index)?;
            }
            progress(index);
        }

        snapshotter.snapshot(&self.dataset, &self.ring, self.iterations)?;
        info!("Training completed after {} iterations", self.iterations);
        Ok(())
    }

    /// The cities being toured, in visitation order.
    pub fn dataset(&self) -> &[City] {
        &self.dataset
    }

    /// The neuron ring in its current state.
    pub fn ring(&self) -> &NeuronRing {
        &self.ring
    }

    /// The current neighborhood radius. May be negative on long runs, which
    /// disables updates until training ends.
    pub fn radius(&self) -> i64 {
        self.radius
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The learning-rate scalar the next step will use.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate.current()
    }
}
