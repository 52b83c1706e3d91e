//! Scorer contract
//!
//! `score(flow) -> probability in [0, 1]`, deterministic for identical input.
//! Implementations are injected into the pipeline, never held globally.

use crate::logic::features::FlowRecord;
use super::inference::ModelMetadata;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreError(pub String);

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScoreError: {}", self.0)
    }
}

impl std::error::Error for ScoreError {}

/// Binary attack-probability model
pub trait ProbabilityScorer: Send + Sync {
    /// Short name for logs and reports
    fn name(&self) -> &str;

    fn score(&self, flow: &FlowRecord) -> Result<f64, ScoreError>;

    /// Loaded model, for scorers backed by one
    fn model_metadata(&self) -> Option<&ModelMetadata> {
        None
    }

    /// Mean time per `score` call so far
    fn avg_latency_ms(&self) -> Option<f64> {
        None
    }
}

impl<T: ProbabilityScorer + ?Sized> ProbabilityScorer for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, flow: &FlowRecord) -> Result<f64, ScoreError> {
        (**self).score(flow)
    }

    fn model_metadata(&self) -> Option<&ModelMetadata> {
        (**self).model_metadata()
    }

    fn avg_latency_ms(&self) -> Option<f64> {
        (**self).avg_latency_ms()
    }
}

/// Reject NaN and values outside [0, 1]
pub fn checked_probability(value: f64) -> Result<f64, ScoreError> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        return Err(ScoreError(format!("probability out of range: {}", value)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_probability() {
        assert_eq!(checked_probability(0.0), Ok(0.0));
        assert_eq!(checked_probability(1.0), Ok(1.0));
        assert!(checked_probability(1.5).is_err());
        assert!(checked_probability(-0.01).is_err());
        assert!(checked_probability(f64::NAN).is_err());
    }
}
