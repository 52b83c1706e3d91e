//! Model Module - Probability Scoring
//!
//! The probability model is an external collaborator. This module holds the
//! scorer contract, the adapters that satisfy it and the attack threshold.

pub mod scorer;
pub mod inference;
pub mod fallback;
pub mod threshold;

// Re-export common types
pub use scorer::{checked_probability, ProbabilityScorer, ScoreError};
pub use inference::{ModelMetadata, OnnxScorer};
pub use fallback::HeuristicScorer;
pub use threshold::AttackThreshold;
