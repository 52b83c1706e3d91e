//! Threat Classifier
//!
//! Logic only: no types, no I/O.
//! Input: FlowRecord (+ probability for `classify_record`)
//! Output: AttackLabel / ClassificationResult

use serde::Serialize;

use crate::logic::features::FlowRecord;
use crate::logic::model::AttackThreshold;
use super::rules::{apply_rules, ATTACK_RULES};
use super::types::{AttackLabel, Classification, ClassificationResult};

/// Which rule produced a label; `rule` is `None` for the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub label: AttackLabel,
    pub rule: Option<&'static str>,
}

/// Run the cascade and report the deciding rule
pub fn explain_match(flow: &FlowRecord) -> RuleMatch {
    match apply_rules(&ATTACK_RULES, flow) {
        Some(rule) => RuleMatch {
            label: rule.label(),
            rule: Some(rule.name()),
        },
        None => RuleMatch {
            label: AttackLabel::UnclassifiedAttack,
            rule: None,
        },
    }
}

/// Attack type for a flow already scored as an attack
///
/// Pure and deterministic: first matching rule wins, no backtracking.
pub fn classify_attack_type(flow: &FlowRecord) -> AttackLabel {
    explain_match(flow).label
}

/// Combine model probability and rule cascade into a per-record result
pub fn classify_record(
    id: usize,
    flow: &FlowRecord,
    probability: f64,
    threshold: &AttackThreshold,
) -> ClassificationResult {
    if !threshold.is_attack(probability) {
        return ClassificationResult {
            id,
            probability,
            classification: Classification::Normal,
            attack_type: None,
        };
    }

    let matched = explain_match(flow);
    log::debug!(
        "Record {}: p={:.3} -> {} ({})",
        id,
        probability,
        matched.label,
        matched.rule.unwrap_or("fallback")
    );

    ClassificationResult {
        id,
        probability,
        classification: Classification::Attack,
        attack_type: Some(matched.label),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::rules::{AttackRule, DdosRule};

    fn syn_flood() -> FlowRecord {
        FlowRecord {
            syn_flag_count: 1.0,
            ack_flag_count: 0.0,
            flow_duration: 50.0,
            total_fwd_packets: 600.0,
            ..Default::default()
        }
    }

    /// Matches none of the nine rules
    fn unmatched() -> FlowRecord {
        FlowRecord {
            total_fwd_packets: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_syn_flood() {
        assert_eq!(classify_attack_type(&syn_flood()), AttackLabel::SynFlood);
    }

    #[test]
    fn test_first_match_wins_over_ddos() {
        // Satisfies rule 1 and rule 2 simultaneously
        let flow = FlowRecord {
            syn_flag_count: 1.0,
            ack_flag_count: 0.0,
            flow_duration: 50.0,
            total_fwd_packets: 2000.0,
            flow_packets_per_sec: 40_000.0,
            ..Default::default()
        };
        assert!(DdosRule.matches(&flow));
        assert_eq!(classify_attack_type(&flow), AttackLabel::SynFlood);
    }

    #[test]
    fn test_ddos() {
        let flow = FlowRecord {
            total_fwd_packets: 2000.0,
            flow_duration: 50.0,
            flow_packets_per_sec: 40_000.0,
            fwd_packet_length_mean: 60.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&flow), AttackLabel::DdosAttack);
    }

    #[test]
    fn test_port_scanning() {
        let flow = FlowRecord {
            destination_port: 445.0,
            fwd_packet_length_mean: 20.0,
            flow_packets_per_sec: 900.0,
            total_fwd_packets: 300.0,
            flow_duration: 400.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&flow), AttackLabel::PortScanning);
    }

    #[test]
    fn test_brute_force() {
        let flow = FlowRecord {
            destination_port: 22.0,
            total_fwd_packets: 120.0,
            packet_length_mean: 60.0,
            flow_iat_mean: 200.0,
            fwd_packet_length_mean: 60.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&flow), AttackLabel::BruteForceAttempt);
    }

    #[test]
    fn test_http_flood_then_slowloris() {
        let http = FlowRecord {
            destination_port: 443.0,
            bwd_packet_length_mean: 1600.0,
            flow_bytes_per_sec: 2_000_000.0,
            fwd_packet_length_mean: 100.0,
            total_fwd_packets: 200.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&http), AttackLabel::HttpFlood);

        let slowloris = FlowRecord {
            destination_port: 80.0,
            fwd_header_length: 1200.0,
            fwd_packets_per_sec: 2.0,
            fwd_packet_length_mean: 100.0,
            total_fwd_packets: 200.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&slowloris), AttackLabel::SlowlorisAttack);
    }

    #[test]
    fn test_exfiltration_and_probing() {
        let exfil = FlowRecord {
            bwd_packets_per_sec: 150.0,
            bwd_packet_length_mean: 1400.0,
            flow_duration: 7200.0,
            total_fwd_packets: 200.0,
            fwd_packet_length_mean: 100.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&exfil), AttackLabel::PossibleDataExfiltration);

        let scan = FlowRecord {
            total_fwd_packets: 3.0,
            active_mean: 1.0,
            fwd_packet_length_min: 0.0,
            ..Default::default()
        };
        assert_eq!(classify_attack_type(&scan), AttackLabel::NetworkProbing);
    }

    #[test]
    fn test_fallback_label_is_not_normal_traffic() {
        let matched = explain_match(&unmatched());
        assert_eq!(matched.label, AttackLabel::UnclassifiedAttack);
        assert_eq!(matched.rule, None);
        assert_ne!(matched.label.as_str(), "Normal Traffic");
    }

    #[test]
    fn test_deterministic() {
        let flow = syn_flood();
        let first = classify_attack_type(&flow);
        for _ in 0..10 {
            assert_eq!(classify_attack_type(&flow), first);
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let threshold = AttackThreshold::default();

        let at = classify_record(1, &syn_flood(), 0.5, &threshold);
        assert_eq!(at.classification, Classification::Normal);
        assert_eq!(at.attack_type, None);

        let above = classify_record(2, &syn_flood(), 0.5000001, &threshold);
        assert_eq!(above.classification, Classification::Attack);
        assert_eq!(above.attack_type, Some(AttackLabel::SynFlood));
    }

    #[test]
    fn test_positive_unmatched_record_gets_fallback() {
        let result = classify_record(3, &unmatched(), 0.9, &AttackThreshold::default());
        assert!(result.is_attack());
        assert_eq!(result.attack_type, Some(AttackLabel::UnclassifiedAttack));
    }

    #[test]
    fn test_explain_names_rule() {
        let matched = explain_match(&syn_flood());
        assert_eq!(matched.rule, Some("SynFloodRule"));
    }
}
