//! Fixed-size circular ring of neurons.

use crate::dataset::Bounds;
use crate::error::{Result, SomTourError};
use crate::som::Neuron;
use rand::Rng;

/// An ordered, circularly indexed sequence of neurons.
///
/// Index arithmetic is taken modulo the ring length: index `len` and index 0
/// name the same slot, and negative indices count backward from the end. The
/// circular topology lets the neuron sequence represent a closed tour. The
/// length never changes after initialization; there is no removal or resize.
#[derive(Debug, Clone)]
pub struct NeuronRing {
    neurons: Vec<Neuron>,
}

impl NeuronRing {
    /// Creates `count` neurons with coordinates drawn uniformly from `bounds`.
    pub fn initialize<R: Rng>(count: usize, bounds: &Bounds, rng: &mut R) -> Result<Self> {
        if count == 0 {
            return Err(SomTourError::Config(
                "ring size must be positive".to_string(),
            ));
        }
        let neurons = (0..count).map(|_| Neuron::random_in(bounds, rng)).collect();
        Ok(Self { neurons })
    }

    /// Wraps an existing neuron sequence, preserving its order.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Self { neurons }
    }

    /// Number of neurons on the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Whether the ring holds no neurons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    #[inline]
    fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.neurons.len() as i64) as usize
    }

    /// Returns the neuron at `index`, wrapping modulo the ring length.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    #[inline]
    pub fn get(&self, index: i64) -> Neuron {
        self.neurons[self.wrap(index)]
    }

    /// Replaces the neuron at `index`, wrapping modulo the ring length.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    #[inline]
    pub fn set(&mut self, index: i64, neuron: Neuron) {
        let slot = self.wrap(index);
        self.neurons[slot] = neuron;
    }

    /// Mutable access to the neuron at `index`, wrapping modulo the ring
    /// length.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    #[inline]
    pub fn get_mut(&mut self, index: i64) -> &mut Neuron {
        let slot = self.wrap(index);
        &mut self.neurons[slot]
    }

    /// The neurons in ring order.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Iterates over the neurons in ring order.
    pub fn iter(&self) -> std::slice::Iter<'_, Neuron> {
        self.neurons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_bounds() -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 50.0,
        }
    }

    #[test]
    fn test_initialize_count_and_bounds() {
        let bounds = test_bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ring = NeuronRing::initialize(116, &bounds, &mut rng).unwrap();

        assert_eq!(ring.len(), 116);
        for neuron in ring.iter() {
            assert!(bounds.contains(neuron.x, neuron.y));
        }
    }

    #[test]
    fn test_initialize_zero_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = NeuronRing::initialize(0, &test_bounds(), &mut rng).unwrap_err();
        assert!(matches!(err, SomTourError::Config(_)));
    }

    #[test]
    fn test_index_wraparound() {
        let ring = NeuronRing::from_neurons(vec![
            Neuron::new(0.0, 0.0),
            Neuron::new(1.0, 0.0),
            Neuron::new(2.0, 0.0),
        ]);

        assert_eq!(ring.get(3), ring.get(0));
        assert_eq!(ring.get(-1), ring.get(2));
        assert_eq!(ring.get(-4), ring.get(2));
        assert_eq!(ring.get(7), ring.get(1));
    }

    #[test]
    fn test_set_wraps() {
        let mut ring = NeuronRing::from_neurons(vec![
            Neuron::new(0.0, 0.0),
            Neuron::new(1.0, 0.0),
        ]);

        ring.set(-1, Neuron::new(9.0, 9.0));
        assert_eq!(ring.get(1), Neuron::new(9.0, 9.0));
    }

    #[test]
    fn test_get_mut_wraps() {
        let mut ring = NeuronRing::from_neurons(vec![
            Neuron::new(0.0, 0.0),
            Neuron::new(1.0, 0.0),
        ]);

        ring.get_mut(2).x = 5.0;
        assert_eq!(ring.get(0).x, 5.0);
    }

    #[test]
    fn test_seeded_initialization_is_reproducible() {
        let bounds = test_bounds();
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);

        let first = NeuronRing::initialize(10, &bounds, &mut a).unwrap();
        let second = NeuronRing::initialize(10, &bounds, &mut b).unwrap();
        assert_eq!(first.neurons(), second.neurons());
    }
}
