//! Report rendering
//!
//! Display formatting is applied here only: attack rate as a percentage with
//! one decimal, average probability with two, per-record probability with
//! three. The numeric values in `BatchReport` stay unrounded.

use std::fmt::Write as _;

use serde::Serialize;

use crate::logic::threat::ClassificationResult;
use super::batch::BatchReport;
use super::summary::ThreatLevel;

// ============================================================================
// FORMATTERS
// ============================================================================

/// 0.3 -> "30.0%"
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_average(probability: f64) -> String {
    format!("{:.2}", probability)
}

pub fn format_probability(probability: f64) -> String {
    format!("{:.3}", probability)
}

fn threat_banner(level: ThreatLevel) -> &'static str {
    match level {
        ThreatLevel::Low => "LOW",
        ThreatLevel::Elevated => "ELEVATED",
        ThreatLevel::High => "HIGH",
    }
}

// ============================================================================
// DISPLAY SUMMARY
// ============================================================================

/// Pre-formatted headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySummary {
    pub total_records: usize,
    pub attacks_detected: usize,
    pub attack_rate: String,
    pub avg_probability: String,
    pub threat_level: String,
}

impl DisplaySummary {
    pub fn from_report(report: &BatchReport) -> Self {
        let s = &report.summary;
        Self {
            total_records: s.total_records,
            attacks_detected: s.attacks_detected,
            attack_rate: format_percent(s.attack_rate),
            avg_probability: format_average(s.avg_probability),
            threat_level: threat_banner(s.threat_level).to_string(),
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

fn result_row(out: &mut String, r: &ClassificationResult) {
    let attack_type = r.attack_type.map(|l| l.as_str()).unwrap_or("-");
    let _ = writeln!(
        out,
        "  {:>6}  {:>11}  {:<7}  {}",
        r.id,
        format_probability(r.probability),
        r.classification.as_str(),
        attack_type
    );
}

/// Human-readable report; `rows` caps the detailed result table
pub fn render_text(report: &BatchReport, rows: usize) -> String {
    let display = DisplaySummary::from_report(report);
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Batch {}", report.batch_id);
    let _ = writeln!(
        out,
        "Generated {}  scorer={}  threshold={}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.scorer,
        report.attack_threshold
    );
    if let Some(model) = &report.model {
        let _ = writeln!(
            out,
            "Model {} (layout v{}, hash {:08x})",
            model.model_path, model.feature_version, model.layout_hash
        );
    }
    if let Some(digest) = &report.input_digest {
        let _ = writeln!(out, "Input sha256 {}", digest);
    }
    out.push('\n');

    let _ = writeln!(out, "Total records     {}", display.total_records);
    let _ = writeln!(out, "Attacks detected  {}", display.attacks_detected);
    let _ = writeln!(out, "Attack rate       {}", display.attack_rate);
    let _ = writeln!(out, "Avg probability   {}", display.avg_probability);
    let _ = writeln!(out, "Threat level      {}", display.threat_level);

    if !summary.attack_types.is_empty() {
        out.push_str("\nAttack types\n");
        for entry in &summary.attack_types {
            let _ = writeln!(out, "  {:<28} {}", entry.attack_type.as_str(), entry.count);
        }
    }

    if !summary.mitigation.is_empty() {
        out.push_str("\nMitigation\n");
        for advice in &summary.mitigation {
            let _ = writeln!(out, "  {}: {}", advice.attack_type, advice.advice);
        }
    }

    if !report.rejected.is_empty() {
        let _ = writeln!(out, "\nRejected records ({})", report.rejected.len());
        for r in &report.rejected {
            let _ = writeln!(out, "  #{} [{}] {}", r.id, r.kind, r.reason);
        }
    }

    if rows > 0 && !report.results.is_empty() {
        let shown = rows.min(report.results.len());
        let _ = writeln!(out, "\nResults (first {} of {})", shown, report.results.len());
        let _ = writeln!(out, "  {:>6}  {:>11}  {:<7}  {}", "id", "probability", "class", "attack type");
        for r in report.results.iter().take(shown) {
            result_row(&mut out, r);
        }
    }

    out
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    display: DisplaySummary,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// Full report plus the formatted headline figures
pub fn render_json(report: &BatchReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        display: DisplaySummary::from_report(report),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::{AttackLabel, Classification};
    use crate::logic::validate::RejectedRecord;

    fn report() -> BatchReport {
        let results = (1..=10)
            .map(|id| {
                let attack = id <= 3;
                ClassificationResult {
                    id,
                    probability: if attack { 0.9 } else { 0.1 },
                    classification: if attack { Classification::Attack } else { Classification::Normal },
                    attack_type: if attack { Some(AttackLabel::SynFlood) } else { None },
                }
            })
            .collect();
        BatchReport::new("stub", 0.5, results, Vec::new())
    }

    #[test]
    fn test_formatters() {
        assert_eq!(format_percent(0.3), "30.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_average(0.333333), "0.33");
        assert_eq!(format_probability(0.12345), "0.123");
    }

    #[test]
    fn test_display_summary() {
        let display = DisplaySummary::from_report(&report());
        assert_eq!(display.attack_rate, "30.0%");
        assert_eq!(display.avg_probability, "0.34");
        assert_eq!(display.threat_level, "LOW");
    }

    #[test]
    fn test_text_contains_headline_and_advice() {
        let text = render_text(&report(), 5);
        assert!(text.contains("Attack rate       30.0%"));
        assert!(text.contains("SYN Flood"));
        assert!(text.contains("Enable SYN cookies and rate limiting"));
        assert!(text.contains("Results (first 5 of 10)"));
        assert!(text.contains("0.900"));
    }

    #[test]
    fn test_text_lists_rejected() {
        let mut r = report();
        r.rejected.push(RejectedRecord {
            id: 4,
            kind: "type_error".to_string(),
            reason: "bad value".to_string(),
        });
        let text = render_text(&r, 0);
        assert!(text.contains("Rejected records (1)"));
        assert!(!text.contains("Results"));
    }

    #[test]
    fn test_json_keeps_raw_numbers() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["display"]["attack_rate"], "30.0%");
        assert!((value["summary"]["attack_rate"].as_f64().unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(value["summary"]["attack_types"][0]["attack_type"], "SYN Flood");
        assert_eq!(value["results"].as_array().unwrap().len(), 10);
        assert_eq!(value["layout"]["feature_count"], 78);
    }
}
