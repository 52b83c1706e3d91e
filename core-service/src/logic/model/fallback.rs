//! Fallback heuristic scorer (no model)
//!
//! Used when no ONNX export is available. Counts how many volumetric and
//! flag signals exceed their limits and adds a bounded deviation term.
//! Deterministic, always within [0, 1].

use crate::logic::features::FlowRecord;
use super::scorer::{ProbabilityScorer, ScoreError};

/// (signal value, limit) pairs; a signal fires when value > limit
fn signals(flow: &FlowRecord) -> [(f64, f64); 6] {
    [
        (flow.flow_packets_per_sec, 500.0),
        (flow.flow_bytes_per_sec, 1_000_000.0),
        (flow.total_fwd_packets, 500.0),
        (flow.syn_flag_count - flow.ack_flag_count, 0.5),
        (flow.urg_flag_count, 0.5),
        (flow.bwd_packets_per_sec, 100.0),
    ]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }
}

impl ProbabilityScorer for HeuristicScorer {
    fn name(&self) -> &str {
        "fallback"
    }

    fn score(&self, flow: &FlowRecord) -> Result<f64, ScoreError> {
        let mut anomaly_count = 0u32;
        let mut max_dev = 0.0f64;

        for (value, limit) in signals(flow) {
            if value.is_finite() && value > limit {
                anomaly_count += 1;
                max_dev = max_dev.max((value - limit) / limit);
            }
        }

        // One-sided traffic with almost no reply
        if flow.total_fwd_packets > 100.0 && flow.down_up_ratio < 0.05 {
            anomaly_count += 1;
        }

        let score = (anomaly_count as f64 / 4.0) + max_dev.min(1.0) * 0.1;
        Ok(score.clamp(0.0, 1.0))
    }
}
