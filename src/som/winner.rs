//! Winner-neuron selection.

use crate::dataset::City;
use crate::error::{Result, SomTourError};
use crate::som::NeuronRing;

/// Finds the index of the neuron nearest to `city` under Manhattan distance.
///
/// The scan keeps the first minimum it sees (strict `<` comparison), so ties
/// break toward the lowest index. This tie-break is part of the contract:
/// reruns over an identical ring must pick the same winner.
pub fn select(city: City, ring: &NeuronRing) -> Result<usize> {
    if ring.is_empty() {
        return Err(SomTourError::EmptyInput(
            "cannot select a winner from an empty ring".to_string(),
        ));
    }

    let mut winner = 0;
    let mut minimum = f64::INFINITY;
    for (index, neuron) in ring.iter().enumerate() {
        let distance = neuron.manhattan_distance(city);
        if distance < minimum {
            minimum = distance;
            winner = index;
        }
    }
    Ok(winner)
}
