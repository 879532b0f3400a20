//! Learning-rate decay strategies.
//!
//! A [`DecayStrategy`] supplies the current learning-rate scalar and advances
//! it once per training iteration. The linear variant is not clamped at zero:
//! once its value crosses zero, the update rule it feeds starts pushing
//! neurons away from cities instead of toward them. That underflow is a
//! documented sharp edge of the schedule, not an error.

use serde::{Deserialize, Serialize};

/// Trait for learning-rate schedules.
pub trait DecayStrategy {
    /// Returns the current scalar. Reading has no side effects and may be
    /// repeated freely within an iteration.
    fn current(&self) -> f64;

    /// Advances the schedule by one iteration. Called exactly once per
    /// training iteration, after all per-iteration updates.
    fn advance(&mut self);
}

/// A learning rate that never changes.
#[derive(Debug, Clone, Copy)]
pub struct ConstantDecay {
    value: f64,
}

impl ConstantDecay {
    /// Creates a constant schedule at `value`.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl DecayStrategy for ConstantDecay {
    fn current(&self) -> f64 {
        self.value
    }

    fn advance(&mut self) {}
}

/// A learning rate that decreases by a fixed step each advance.
#[derive(Debug, Clone, Copy)]
pub struct LinearDecay {
    value: f64,
    step: f64,
}

impl LinearDecay {
    /// Creates a linear schedule starting at `initial`, losing `step` per
    /// advance.
    pub fn new(initial: f64, step: f64) -> Self {
        Self {
            value: initial,
            step,
        }
    }
}

impl DecayStrategy for LinearDecay {
    fn current(&self) -> f64 {
        self.value
    }

    fn advance(&mut self) {
        self.value -= self.step;
    }
}

/// A learning rate multiplied by a fixed factor each advance.
///
/// With a factor in (0, 1) and a positive initial value, the rate approaches
/// zero without ever reaching it.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialDecay {
    value: f64,
    factor: f64,
}

impl ExponentialDecay {
    /// Creates an exponential schedule starting at `initial`, scaled by
    /// `factor` per advance.
    pub fn new(initial: f64, factor: f64) -> Self {
        Self {
            value: initial,
            factor,
        }
    }
}

impl DecayStrategy for ExponentialDecay {
    fn current(&self) -> f64 {
        self.value
    }

    fn advance(&mut self) {
        self.value *= self.factor;
    }
}

/// Serializable description of a decay strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecaySpec {
    /// A rate that never changes.
    Constant {
        /// The fixed rate.
        value: f64,
    },
    /// A rate losing a fixed step per iteration.
    Linear {
        /// Starting rate.
        initial: f64,
        /// Per-iteration decrement.
        step: f64,
    },
    /// A rate scaled by a fixed factor per iteration.
    Exponential {
        /// Starting rate.
        initial: f64,
        /// Per-iteration factor, expected in (0, 1).
        factor: f64,
    },
}

impl DecaySpec {
    /// Builds the strategy this spec describes.
    pub fn build(&self) -> Box<dyn DecayStrategy> {
        match *self {
            DecaySpec::Constant { value } => Box::new(ConstantDecay::new(value)),
            DecaySpec::Linear { initial, step } => Box::new(LinearDecay::new(initial, step)),
            DecaySpec::Exponential { initial, factor } => {
                Box::new(ExponentialDecay::new(initial, factor))
            }
        }
    }
}

impl Default for DecaySpec {
    fn default() -> Self {
        DecaySpec::Exponential {
            initial: 0.8,
            factor: 0.9999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_is_invariant() {
        let mut decay = ConstantDecay::new(0.5);
        for _ in 0..1000 {
            assert_eq!(decay.current(), 0.5);
            decay.advance();
        }
        assert_eq!(decay.current(), 0.5);
    }

    #[test]
    fn test_linear_decreases_by_step() {
        let mut decay = LinearDecay::new(1.0, 0.25);
        decay.advance();
        assert!((decay.current() - 0.75).abs() < 1e-10);
        decay.advance();
        assert!((decay.current() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_linear_crosses_zero() {
        let mut decay = LinearDecay::new(0.1, 0.06);
        decay.advance();
        decay.advance();
        assert!(decay.current() < 0.0);
    }

    #[test]
    fn test_exponential_shrinks_but_stays_positive() {
        let mut decay = ExponentialDecay::new(0.8, 0.9);
        let mut previous = decay.current();
        for _ in 0..200 {
            decay.advance();
            assert!(decay.current() < previous);
            assert!(decay.current() > 0.0);
            previous = decay.current();
        }
    }

    #[test]
    fn test_current_has_no_side_effects() {
        let decay = ExponentialDecay::new(0.8, 0.9999);
        let first = decay.current();
        let second = decay.current();
        assert_eq!(first, second);
    }

    #[test]
    fn test_spec_builds_matching_strategy() {
        let spec = DecaySpec::Linear {
            initial: 1.0,
            step: 0.5,
        };
        let mut strategy = spec.build();
        assert_eq!(strategy.current(), 1.0);
        strategy.advance();
        assert_eq!(strategy.current(), 0.5);
    }

    #[test]
    fn test_default_spec_is_exponential() {
        assert_eq!(
            DecaySpec::default(),
            DecaySpec::Exponential {
                initial: 0.8,
                factor: 0.9999,
            }
        );
    }
}
