//! Attack Threshold
//!
//! A flow is an attack when its probability is strictly greater than the
//! threshold. The threshold itself must lie in [0, 1].

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ATTACK_THRESHOLD;
use crate::error::{IdpsError, IdpsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackThreshold(f64);

impl AttackThreshold {
    pub fn new(value: f64) -> IdpsResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(IdpsError::Config(format!(
                "attack threshold must be within [0, 1], got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Strict comparison: a probability equal to the threshold is not an attack
    pub fn is_attack(&self, probability: f64) -> bool {
        probability > self.0
    }
}

impl Default for AttackThreshold {
    fn default() -> Self {
        Self(DEFAULT_ATTACK_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(AttackThreshold::default().value(), 0.5);
    }

    #[test]
    fn test_boundary_is_strict() {
        let threshold = AttackThreshold::default();
        assert!(!threshold.is_attack(0.5));
        assert!(threshold.is_attack(0.5000001));
        assert!(!threshold.is_attack(0.0));
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(AttackThreshold::new(1.01).is_err());
        assert!(AttackThreshold::new(-0.5).is_err());
        assert!(AttackThreshold::new(f64::NAN).is_err());
        assert!(AttackThreshold::new(0.8).is_ok());
    }
}
