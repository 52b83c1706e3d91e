//! Batch aggregation
//!
//! Pure reduction over classification results: counts, rates, per-type
//! histogram, probability distribution and overall threat level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::PROBABILITY_BINS;
use crate::logic::threat::{AttackLabel, ClassificationResult};
use super::mitigation::{advice_for, MitigationAdvice};

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Gauge band for the batch mean probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Elevated,
    High,
}

impl ThreatLevel {
    pub const ELEVATED_AT: f64 = 0.4;
    pub const HIGH_AT: f64 = 0.6;

    pub fn from_probability(avg_probability: f64) -> Self {
        if avg_probability >= Self::HIGH_AT {
            ThreatLevel::High
        } else if avg_probability >= Self::ELEVATED_AT {
            ThreatLevel::Elevated
        } else {
            ThreatLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Elevated => "elevated",
            ThreatLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SUMMARY TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTypeCount {
    pub attack_type: AttackLabel,
    pub count: usize,
}

/// One histogram bin over [lower, upper)
///
/// The last bin also holds probability 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBin {
    pub lower: f64,
    pub upper: f64,
    pub attacks: usize,
    pub normals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub attacks_detected: usize,
    /// Fraction in [0, 1]; 0.0 for an empty batch
    pub attack_rate: f64,
    /// Mean probability over all records; 0.0 for an empty batch
    pub avg_probability: f64,
    /// Only labels that occur, taxonomy order
    pub attack_types: Vec<AttackTypeCount>,
    pub mitigation: Vec<MitigationAdvice>,
    pub threat_level: ThreatLevel,
    pub distribution: Vec<ProbabilityBin>,
}

impl BatchSummary {
    pub fn normal_count(&self) -> usize {
        self.total_records - self.attacks_detected
    }

    pub fn count_for(&self, label: AttackLabel) -> usize {
        self.attack_types
            .iter()
            .find(|c| c.attack_type == label)
            .map_or(0, |c| c.count)
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

fn bin_index(probability: f64) -> usize {
    let idx = (probability * PROBABILITY_BINS as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(PROBABILITY_BINS - 1)
    }
}

fn distribution(results: &[ClassificationResult]) -> Vec<ProbabilityBin> {
    let width = 1.0 / PROBABILITY_BINS as f64;
    let mut bins: Vec<ProbabilityBin> = (0..PROBABILITY_BINS)
        .map(|i| ProbabilityBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            attacks: 0,
            normals: 0,
        })
        .collect();

    for result in results {
        let bin = &mut bins[bin_index(result.probability)];
        if result.is_attack() {
            bin.attacks += 1;
        } else {
            bin.normals += 1;
        }
    }

    bins
}

/// Reduce per-record results to batch statistics
pub fn summarize(results: &[ClassificationResult]) -> BatchSummary {
    let total_records = results.len();

    let mut per_type: BTreeMap<AttackLabel, usize> = BTreeMap::new();
    for label in results
        .iter()
        .filter(|r| r.is_attack())
        .filter_map(|r| r.attack_type)
    {
        *per_type.entry(label).or_insert(0) += 1;
    }
    let attacks_detected = results.iter().filter(|r| r.is_attack()).count();

    let (attack_rate, avg_probability) = if total_records == 0 {
        (0.0, 0.0)
    } else {
        let sum: f64 = results.iter().map(|r| r.probability).sum();
        (
            attacks_detected as f64 / total_records as f64,
            sum / total_records as f64,
        )
    };

    let attack_types = per_type
        .iter()
        .map(|(&attack_type, &count)| AttackTypeCount { attack_type, count })
        .collect();

    BatchSummary {
        total_records,
        attacks_detected,
        attack_rate,
        avg_probability,
        attack_types,
        mitigation: advice_for(per_type.keys().copied()),
        threat_level: ThreatLevel::from_probability(avg_probability),
        distribution: distribution(results),
    }
}
