//! Attack-Type Rules
//!
//! One rule per attack label. `ATTACK_RULES` fixes the evaluation order:
//! several rules can hold for the same flow and only the first is reported.

use crate::logic::features::FlowRecord;
use super::types::AttackLabel;

// ============================================================================
// PORT GATES
// ============================================================================

/// SSH, Telnet
pub const REMOTE_LOGIN_PORTS: &[u16] = &[22, 23];

/// HTTP, HTTPS, HTTP alternate
pub const WEB_PORTS: &[u16] = &[80, 443, 8080];

fn port_in(flow: &FlowRecord, ports: &[u16]) -> bool {
    flow.port().map_or(false, |p| ports.contains(&p))
}

// ============================================================================
// ATTACK RULE TRAIT
// ============================================================================

/// A named, side-effect-free condition over one flow
pub trait AttackRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn label(&self) -> AttackLabel;
    fn matches(&self, flow: &FlowRecord) -> bool;
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Half-open handshakes: SYNs without ACKs, many forward packets, short flow
pub struct SynFloodRule;

impl AttackRule for SynFloodRule {
    fn name(&self) -> &'static str {
        "SynFloodRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::SynFlood
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.syn_flag_count > 0.8
            && flow.ack_flag_count < 0.2
            && flow.flow_duration < 1000.0
            && flow.total_fwd_packets > 500.0
    }
}

/// Volumetric burst
pub struct DdosRule;

impl AttackRule for DdosRule {
    fn name(&self) -> &'static str {
        "DdosRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::DdosAttack
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.total_fwd_packets > 1000.0
            && flow.flow_duration < 100.0
            && flow.flow_packets_per_sec > 500.0
    }
}

/// Tiny packets at a high rate against well-known ports
pub struct PortScanRule;

impl AttackRule for PortScanRule {
    fn name(&self) -> &'static str {
        "PortScanRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::PortScanning
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.fwd_packet_length_mean < 50.0
            && flow.flow_packets_per_sec > 500.0
            && flow.destination_port < 1024.0
    }
}

/// Rapid short exchanges against SSH/Telnet
pub struct BruteForceRule;

impl AttackRule for BruteForceRule {
    fn name(&self) -> &'static str {
        "BruteForceRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::BruteForceAttempt
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        if !port_in(flow, REMOTE_LOGIN_PORTS) || flow.total_fwd_packets <= 50.0 {
            return false;
        }
        flow.packet_length_mean < 100.0 && flow.flow_iat_mean < 1000.0
    }
}

/// Large responses at a high byte rate from a web port
pub struct HttpFloodRule;

impl AttackRule for HttpFloodRule {
    fn name(&self) -> &'static str {
        "HttpFloodRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::HttpFlood
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        if !port_in(flow, WEB_PORTS) {
            return false;
        }
        flow.bwd_packet_length_mean > 1500.0 && flow.flow_bytes_per_sec > 1_000_000.0
    }
}

/// Oversized headers trickled slowly to a web port
pub struct SlowlorisRule;

impl AttackRule for SlowlorisRule {
    fn name(&self) -> &'static str {
        "SlowlorisRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::SlowlorisAttack
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        if !port_in(flow, WEB_PORTS) {
            return false;
        }
        flow.fwd_header_length > 800.0 && flow.fwd_packets_per_sec < 10.0
    }
}

/// Unusual flags or erratic packet sizes (any one is enough)
pub struct SuspiciousActivityRule;

impl AttackRule for SuspiciousActivityRule {
    fn name(&self) -> &'static str {
        "SuspiciousActivityRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::SuspiciousActivity
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.urg_flag_count > 0.5
            || flow.fwd_psh_flags > 0.7
            || flow.packet_length_variance > 500.0
    }
}

/// Long-lived flow pushing large packets backwards at a steady rate
pub struct DataExfiltrationRule;

impl AttackRule for DataExfiltrationRule {
    fn name(&self) -> &'static str {
        "DataExfiltrationRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::PossibleDataExfiltration
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.bwd_packets_per_sec > 100.0
            && flow.bwd_packet_length_mean > 1000.0
            && flow.flow_duration > 3600.0
    }
}

/// Few small packets with little activity
pub struct NetworkProbeRule;

impl AttackRule for NetworkProbeRule {
    fn name(&self) -> &'static str {
        "NetworkProbeRule"
    }

    fn label(&self) -> AttackLabel {
        AttackLabel::NetworkProbing
    }

    fn matches(&self, flow: &FlowRecord) -> bool {
        flow.total_fwd_packets < 100.0
            && flow.active_mean < 50.0
            && flow.fwd_packet_length_min < 40.0
    }
}

/// Evaluation order. Do not reorder: first match wins.
pub static ATTACK_RULES: [&dyn AttackRule; 9] = [
    &SynFloodRule,
    &DdosRule,
    &PortScanRule,
    &BruteForceRule,
    &HttpFloodRule,
    &SlowlorisRule,
    &SuspiciousActivityRule,
    &DataExfiltrationRule,
    &NetworkProbeRule,
];

// ============================================================================
// RULE ENGINE
// ============================================================================

/// Apply rules in order, return the first that matches
pub fn apply_rules<'a>(rules: &[&'a dyn AttackRule], flow: &FlowRecord) -> Option<&'a dyn AttackRule> {
    rules.iter().copied().find(|rule| rule.matches(flow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_labels_follow_taxonomy_order() {
        let labels: Vec<AttackLabel> = ATTACK_RULES.iter().map(|r| r.label()).collect();
        assert_eq!(labels, AttackLabel::ALL[..9].to_vec());
    }

    #[test]
    fn test_brute_force_requires_login_port() {
        let mut flow = FlowRecord {
            destination_port: 22.0,
            total_fwd_packets: 60.0,
            packet_length_mean: 80.0,
            flow_iat_mean: 500.0,
            ..Default::default()
        };
        assert!(BruteForceRule.matches(&flow));

        flow.destination_port = 2222.0;
        assert!(!BruteForceRule.matches(&flow));

        flow.destination_port = 23.0;
        flow.total_fwd_packets = 50.0;
        assert!(!BruteForceRule.matches(&flow));
    }

    #[test]
    fn test_web_rules_require_web_port() {
        let flow = FlowRecord {
            destination_port: 8443.0,
            bwd_packet_length_mean: 2000.0,
            flow_bytes_per_sec: 2_000_000.0,
            fwd_header_length: 900.0,
            fwd_packets_per_sec: 1.0,
            ..Default::default()
        };
        assert!(!HttpFloodRule.matches(&flow));
        assert!(!SlowlorisRule.matches(&flow));

        let on_8080 = FlowRecord {
            destination_port: 8080.0,
            ..flow
        };
        assert!(HttpFloodRule.matches(&on_8080));
        assert!(SlowlorisRule.matches(&on_8080));
    }

    #[test]
    fn test_suspicious_activity_is_disjunction() {
        let urg = FlowRecord { urg_flag_count: 1.0, ..Default::default() };
        let psh = FlowRecord { fwd_psh_flags: 0.8, ..Default::default() };
        let var = FlowRecord { packet_length_variance: 501.0, ..Default::default() };

        assert!(SuspiciousActivityRule.matches(&urg));
        assert!(SuspiciousActivityRule.matches(&psh));
        assert!(SuspiciousActivityRule.matches(&var));
        assert!(!SuspiciousActivityRule.matches(&FlowRecord::default()));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let flow = FlowRecord {
            bwd_packets_per_sec: 100.0,
            bwd_packet_length_mean: 1001.0,
            flow_duration: 3601.0,
            ..Default::default()
        };
        assert!(!DataExfiltrationRule.matches(&flow));
        assert!(DataExfiltrationRule.matches(&FlowRecord {
            bwd_packets_per_sec: 100.5,
            ..flow
        }));
    }

    #[test]
    fn test_apply_rules_returns_first_match() {
        let flow = FlowRecord {
            urg_flag_count: 1.0,
            total_fwd_packets: 10.0,
            active_mean: 1.0,
            fwd_packet_length_min: 10.0,
            ..Default::default()
        };
        assert!(NetworkProbeRule.matches(&flow));

        let rule = apply_rules(&ATTACK_RULES, &flow).unwrap();
        assert_eq!(rule.label(), AttackLabel::SuspiciousActivity);
    }
}
