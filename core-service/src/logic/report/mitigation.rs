//! Mitigation advice per attack type

use serde::{Deserialize, Serialize};

use crate::logic::threat::AttackLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationAdvice {
    pub attack_type: AttackLabel,
    pub advice: String,
}

pub fn mitigation_for(label: AttackLabel) -> &'static str {
    match label {
        AttackLabel::SynFlood => "Enable SYN cookies and rate limiting",
        AttackLabel::DdosAttack => "Contact your DDoS protection service",
        AttackLabel::PortScanning => "Block the scanning source and close unused ports",
        AttackLabel::BruteForceAttempt => {
            "Enforce key-based SSH authentication and lock out repeated failed logins"
        }
        AttackLabel::HttpFlood => "Enable web application firewall rate limiting and caching",
        AttackLabel::SlowlorisAttack => {
            "Lower HTTP header timeouts and cap concurrent connections per client"
        }
        AttackLabel::SuspiciousActivity => "Inspect flows with unusual URG/PSH flags or packet sizes",
        AttackLabel::PossibleDataExfiltration => {
            "Review long-lived outbound transfers and enforce egress filtering"
        }
        AttackLabel::NetworkProbing => "Restrict ICMP and unsolicited scans at the perimeter",
        AttackLabel::UnclassifiedAttack => {
            "Review the flagged flows manually; no known attack pattern matched"
        }
    }
}

/// One advice line per label present, in taxonomy order
pub fn advice_for<I>(labels: I) -> Vec<MitigationAdvice>
where
    I: IntoIterator<Item = AttackLabel>,
{
    let mut present: Vec<AttackLabel> = labels.into_iter().collect();
    present.sort();
    present.dedup();

    present
        .into_iter()
        .map(|attack_type| MitigationAdvice {
            attack_type,
            advice: mitigation_for(attack_type).to_string(),
        })
        .collect()
}
