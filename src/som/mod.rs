//! Ring-topology Self-Organizing Map for tour approximation.
//!
//! The ring is a circular sequence of movable neurons. Training repeatedly
//! picks the next city, finds the nearest neuron (the winner), and pulls the
//! winner and a shrinking neighborhood of ring indices toward the city. Over
//! many iterations the ring settles into a closed curve threading the cities.

mod neuron;
mod ring;

pub mod decay;
pub mod trainer;
pub mod winner;

pub use decay::{ConstantDecay, DecaySpec, DecayStrategy, ExponentialDecay, LinearDecay};
pub use neuron::Neuron;
pub use ring::NeuronRing;
pub use trainer::{snapshot_due, Trainer};
