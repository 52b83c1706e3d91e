//! Threat Types
//!
//! Core types for flow classification.
//! No logic here, only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// ATTACK LABEL
// ============================================================================

/// Attack taxonomy, in rule-cascade order
///
/// The derived `Ord` follows declaration order, which is the order used for
/// histograms and mitigation advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttackLabel {
    #[serde(rename = "SYN Flood")]
    SynFlood,
    #[serde(rename = "DDoS Attack")]
    DdosAttack,
    #[serde(rename = "Port Scanning")]
    PortScanning,
    #[serde(rename = "Brute Force Attempt")]
    BruteForceAttempt,
    #[serde(rename = "HTTP Flood")]
    HttpFlood,
    #[serde(rename = "Slowloris Attack")]
    SlowlorisAttack,
    #[serde(rename = "Suspicious Activity")]
    SuspiciousActivity,
    #[serde(rename = "Possible Data Exfiltration")]
    PossibleDataExfiltration,
    #[serde(rename = "Network Probing")]
    NetworkProbing,
    /// Attack-scored flow that matched no rule
    #[serde(rename = "Unclassified Attack")]
    UnclassifiedAttack,
}

impl AttackLabel {
    pub const ALL: [AttackLabel; 10] = [
        AttackLabel::SynFlood,
        AttackLabel::DdosAttack,
        AttackLabel::PortScanning,
        AttackLabel::BruteForceAttempt,
        AttackLabel::HttpFlood,
        AttackLabel::SlowlorisAttack,
        AttackLabel::SuspiciousActivity,
        AttackLabel::PossibleDataExfiltration,
        AttackLabel::NetworkProbing,
        AttackLabel::UnclassifiedAttack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackLabel::SynFlood => "SYN Flood",
            AttackLabel::DdosAttack => "DDoS Attack",
            AttackLabel::PortScanning => "Port Scanning",
            AttackLabel::BruteForceAttempt => "Brute Force Attempt",
            AttackLabel::HttpFlood => "HTTP Flood",
            AttackLabel::SlowlorisAttack => "Slowloris Attack",
            AttackLabel::SuspiciousActivity => "Suspicious Activity",
            AttackLabel::PossibleDataExfiltration => "Possible Data Exfiltration",
            AttackLabel::NetworkProbing => "Network Probing",
            AttackLabel::UnclassifiedAttack => "Unclassified Attack",
        }
    }
}

impl std::fmt::Display for AttackLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Binary model decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Attack,
    Normal,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Attack => "Attack",
            Classification::Normal => "Normal",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Per-record outcome
///
/// `attack_type` is `Some` exactly when `classification` is `Attack`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 1-based position in the uploaded batch
    pub id: usize,
    pub probability: f64,
    pub classification: Classification,
    pub attack_type: Option<AttackLabel>,
}

impl ClassificationResult {
    pub fn is_attack(&self) -> bool {
        self.classification == Classification::Attack
    }
}
