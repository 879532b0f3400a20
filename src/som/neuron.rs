//! Neuron representation for the tour ring.

use crate::dataset::{Bounds, City};
use rand::Rng;

/// A neuron on the ring: a movable point on the same plane as the cities.
///
/// Coordinates are mutated in place during training; the containing ring is
/// the neuron's exclusive owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neuron {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Neuron {
    /// Creates a neuron at the given point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a neuron with coordinates drawn uniformly from `bounds`.
    pub fn random_in<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(bounds.min_x..=bounds.max_x),
            y: rng.gen_range(bounds.min_y..=bounds.max_y),
        }
    }

    /// Manhattan distance from this neuron to a city.
    #[inline]
    pub fn manhattan_distance(&self, city: City) -> f64 {
        (self.x - city.x).abs() + (self.y - city.y).abs()
    }

    /// Pulls the neuron toward a city by the competitive-learning rule.
    ///
    /// Each coordinate moves `learning_rate × influence` of the remaining
    /// distance. A product above 1 overshoots and a negative learning rate
    /// pushes away; neither is clamped here.
    pub fn update(&mut self, city: City, learning_rate: f64, influence: f64) {
        let amount = learning_rate * influence;
        self.x += amount * (city.x - self.x);
        self.y += amount * (city.y - self.y);
    }
}
