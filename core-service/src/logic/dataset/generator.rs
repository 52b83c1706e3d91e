//! Synthetic flow generator
//!
//! Produces labelled batches in the upload format for demos and tests:
//! benign traffic plus three attack families. Values are drawn with the
//! same shape as CIC-style flow exports (milliseconds, byte/packet totals,
//! derived rates).

use std::fs::File;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::IdpsResult;
use crate::logic::features::{FlowRecord, FEATURE_LAYOUT};

/// Column appended after the schema features in generated files
pub const LABEL_COLUMN: &str = "label";

/// Kind of synthetic traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficKind {
    Normal,
    Ddos,
    Portscan,
    Generic,
}

impl TrafficKind {
    /// Value written to the label column
    pub fn label(&self) -> &'static str {
        match self {
            TrafficKind::Normal => "normal",
            TrafficKind::Ddos => "ddos",
            TrafficKind::Portscan => "portscan",
            TrafficKind::Generic => "attack",
        }
    }
}

/// A generated flow and its ground-truth label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledFlow {
    pub flow: FlowRecord,
    pub kind: TrafficKind,
}

fn int<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> f64 {
    rng.gen_range(low..=high) as f64
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    rng.gen_range(low..high)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[u32]) -> f64 {
    choices.choose(rng).copied().unwrap_or_default() as f64
}

/// Value drawn only when the backward direction carried packets
fn if_bwd(bwd_packets: f64, value: f64) -> f64 {
    if bwd_packets > 0.0 {
        value
    } else {
        0.0
    }
}

/// Benign traffic: moderate packet counts, long-ish durations
pub fn normal_flow<R: Rng + ?Sized>(rng: &mut R) -> FlowRecord {
    let duration = int(rng, 100, 10_000);
    let fwd_packets = int(rng, 5, 50);
    let bwd_packets = int(rng, 5, 50);
    let fwd_length = int(rng, 1_000, 10_000);
    let bwd_length = int(rng, 500, 8_000);
    let total_packets = fwd_packets + bwd_packets;

    FlowRecord {
        destination_port: pick(rng, &[80, 443, 22, 53, 3389]),
        flow_duration: duration,
        total_fwd_packets: fwd_packets,
        total_backward_packets: bwd_packets,
        total_length_fwd_packets: fwd_length,
        total_length_bwd_packets: bwd_length,
        fwd_packet_length_max: int(rng, 500, 2_000),
        fwd_packet_length_min: int(rng, 20, 100),
        fwd_packet_length_mean: fwd_length / fwd_packets,
        fwd_packet_length_std: int(rng, 50, 200),
        bwd_packet_length_max: int(rng, 300, 1_500),
        bwd_packet_length_min: int(rng, 10, 50),
        bwd_packet_length_mean: bwd_length / bwd_packets,
        bwd_packet_length_std: int(rng, 20, 150),
        flow_bytes_per_sec: (fwd_length + bwd_length) * 1000.0 / duration,
        flow_packets_per_sec: total_packets * 1000.0 / duration,
        flow_iat_mean: duration / total_packets,
        flow_iat_std: uniform(rng, 0.1, 10.0),
        flow_iat_max: uniform(rng, 1.0, 100.0),
        flow_iat_min: uniform(rng, 0.01, 1.0),
        fwd_iat_total: duration,
        fwd_iat_mean: duration / fwd_packets,
        fwd_iat_std: uniform(rng, 0.1, 10.0),
        fwd_iat_max: uniform(rng, 1.0, 100.0),
        fwd_iat_min: uniform(rng, 0.01, 1.0),
        bwd_iat_total: duration,
        bwd_iat_mean: duration / bwd_packets,
        bwd_iat_std: uniform(rng, 0.1, 10.0),
        bwd_iat_max: uniform(rng, 1.0, 100.0),
        bwd_iat_min: uniform(rng, 0.01, 1.0),
        fwd_psh_flags: int(rng, 0, 1),
        bwd_psh_flags: int(rng, 0, 1),
        fwd_urg_flags: 0.0,
        bwd_urg_flags: 0.0,
        fwd_header_length: int(rng, 20, 60),
        bwd_header_length: int(rng, 20, 60),
        fwd_packets_per_sec: fwd_packets * 1000.0 / duration,
        bwd_packets_per_sec: bwd_packets * 1000.0 / duration,
        min_packet_length: int(rng, 20, 100),
        max_packet_length: int(rng, 500, 2_000),
        packet_length_mean: (fwd_length + bwd_length) / total_packets,
        packet_length_std: int(rng, 50, 200),
        packet_length_variance: int(rng, 2_500, 40_000),
        fin_flag_count: int(rng, 0, 1),
        syn_flag_count: int(rng, 0, 1),
        rst_flag_count: 0.0,
        psh_flag_count: int(rng, 0, 1),
        ack_flag_count: int(rng, 1, bwd_packets as u32),
        urg_flag_count: 0.0,
        cwe_flag_count: 0.0,
        ece_flag_count: 0.0,
        down_up_ratio: bwd_packets / fwd_packets,
        average_packet_size: (fwd_length + bwd_length) / total_packets,
        avg_fwd_segment_size: fwd_length / fwd_packets,
        avg_bwd_segment_size: bwd_length / bwd_packets,
        fwd_header_length_1: int(rng, 20, 60),
        fwd_avg_bytes_per_bulk: 0.0,
        fwd_avg_packets_per_bulk: 0.0,
        fwd_avg_bulk_rate: 0.0,
        bwd_avg_bytes_per_bulk: 0.0,
        bwd_avg_packets_per_bulk: 0.0,
        bwd_avg_bulk_rate: 0.0,
        subflow_fwd_packets: fwd_packets,
        subflow_fwd_bytes: fwd_length,
        subflow_bwd_packets: bwd_packets,
        subflow_bwd_bytes: bwd_length,
        init_win_bytes_forward: pick(rng, &[8192, 65535]),
        init_win_bytes_backward: pick(rng, &[8192, 65535]),
        act_data_pkt_fwd: int(rng, 1, fwd_packets as u32),
        min_seg_size_forward: int(rng, 20, 60),
        active_mean: uniform(rng, 1.0, 100.0),
        active_std: uniform(rng, 0.1, 10.0),
        active_max: uniform(rng, 10.0, 200.0),
        active_min: uniform(rng, 0.1, 10.0),
        idle_mean: uniform(rng, 1.0, 100.0),
        idle_std: uniform(rng, 0.1, 10.0),
        idle_max: uniform(rng, 10.0, 200.0),
        idle_min: uniform(rng, 0.1, 10.0),
    }
}

/// Attack traffic: short bursts of many small forward packets
pub fn attack_flow<R: Rng + ?Sized>(rng: &mut R, kind: TrafficKind) -> FlowRecord {
    let (port, duration, fwd_packets, bwd_packets, fwd_size, bwd_size) = match kind {
        TrafficKind::Ddos => (
            pick(rng, &[80, 443]),
            int(rng, 10, 100),
            int(rng, 500, 5_000),
            int(rng, 0, 10),
            int(rng, 10, 100),
            int(rng, 10, 100),
        ),
        TrafficKind::Portscan => (
            pick(rng, &[22, 3389, 445]),
            int(rng, 50, 500),
            int(rng, 100, 1_000),
            int(rng, 0, 5),
            int(rng, 20, 100),
            int(rng, 20, 100),
        ),
        _ => (
            int(rng, 10_000, 20_000),
            int(rng, 10, 100),
            int(rng, 1_000, 10_000),
            int(rng, 0, 5),
            int(rng, 5, 50),
            int(rng, 5, 50),
        ),
    };
    let fwd_length = fwd_packets * fwd_size;
    let bwd_length = bwd_packets * bwd_size;
    let total_packets = fwd_packets + bwd_packets;
    let safe_bwd = bwd_packets.max(1.0);

    FlowRecord {
        destination_port: port,
        flow_duration: duration,
        total_fwd_packets: fwd_packets,
        total_backward_packets: bwd_packets,
        total_length_fwd_packets: fwd_length,
        total_length_bwd_packets: bwd_length,
        fwd_packet_length_max: int(rng, 50, 500),
        fwd_packet_length_min: int(rng, 5, 20),
        fwd_packet_length_mean: fwd_length / fwd_packets,
        fwd_packet_length_std: int(rng, 5, 50),
        bwd_packet_length_max: if_bwd(bwd_packets, int(rng, 20, 200)),
        bwd_packet_length_min: if_bwd(bwd_packets, int(rng, 2, 10)),
        bwd_packet_length_mean: if_bwd(bwd_packets, bwd_length / safe_bwd),
        bwd_packet_length_std: if_bwd(bwd_packets, int(rng, 2, 20)),
        flow_bytes_per_sec: (fwd_length + bwd_length) * 1000.0 / duration,
        flow_packets_per_sec: total_packets * 1000.0 / duration,
        flow_iat_mean: duration / total_packets,
        flow_iat_std: uniform(rng, 0.001, 0.1),
        flow_iat_max: uniform(rng, 0.01, 1.0),
        flow_iat_min: uniform(rng, 0.001, 0.01),
        fwd_iat_total: duration,
        fwd_iat_mean: duration / fwd_packets,
        fwd_iat_std: uniform(rng, 0.001, 0.1),
        fwd_iat_max: uniform(rng, 0.01, 1.0),
        fwd_iat_min: uniform(rng, 0.001, 0.01),
        bwd_iat_total: if_bwd(bwd_packets, duration),
        bwd_iat_mean: if_bwd(bwd_packets, duration / safe_bwd),
        bwd_iat_std: if_bwd(bwd_packets, uniform(rng, 0.001, 0.1)),
        bwd_iat_max: if_bwd(bwd_packets, uniform(rng, 0.01, 1.0)),
        bwd_iat_min: if_bwd(bwd_packets, uniform(rng, 0.001, 0.01)),
        fwd_psh_flags: 0.0,
        bwd_psh_flags: 0.0,
        fwd_urg_flags: 0.0,
        bwd_urg_flags: 0.0,
        fwd_header_length: int(rng, 20, 40),
        bwd_header_length: if_bwd(bwd_packets, int(rng, 20, 40)),
        fwd_packets_per_sec: fwd_packets * 1000.0 / duration,
        bwd_packets_per_sec: if_bwd(bwd_packets, bwd_packets * 1000.0 / duration),
        min_packet_length: int(rng, 5, 20),
        max_packet_length: int(rng, 50, 500),
        packet_length_mean: (fwd_length + bwd_length) / total_packets,
        packet_length_std: int(rng, 5, 50),
        packet_length_variance: int(rng, 25, 2_500),
        fin_flag_count: 0.0,
        syn_flag_count: if kind == TrafficKind::Portscan { 1.0 } else { 0.0 },
        rst_flag_count: 0.0,
        psh_flag_count: 0.0,
        ack_flag_count: if_bwd(bwd_packets, int(rng, 0, safe_bwd as u32)),
        urg_flag_count: 0.0,
        cwe_flag_count: 0.0,
        ece_flag_count: 0.0,
        down_up_ratio: bwd_packets / fwd_packets,
        average_packet_size: (fwd_length + bwd_length) / total_packets,
        avg_fwd_segment_size: fwd_length / fwd_packets,
        avg_bwd_segment_size: if_bwd(bwd_packets, bwd_length / safe_bwd),
        fwd_header_length_1: int(rng, 20, 40),
        fwd_avg_bytes_per_bulk: 0.0,
        fwd_avg_packets_per_bulk: 0.0,
        fwd_avg_bulk_rate: 0.0,
        bwd_avg_bytes_per_bulk: 0.0,
        bwd_avg_packets_per_bulk: 0.0,
        bwd_avg_bulk_rate: 0.0,
        subflow_fwd_packets: fwd_packets,
        subflow_fwd_bytes: fwd_length,
        subflow_bwd_packets: bwd_packets,
        subflow_bwd_bytes: bwd_length,
        init_win_bytes_forward: 8192.0,
        init_win_bytes_backward: if_bwd(bwd_packets, 8192.0),
        act_data_pkt_fwd: fwd_packets,
        min_seg_size_forward: int(rng, 5, 20),
        active_mean: uniform(rng, 0.01, 1.0),
        active_std: uniform(rng, 0.001, 0.1),
        active_max: uniform(rng, 0.1, 2.0),
        active_min: uniform(rng, 0.001, 0.1),
        idle_mean: uniform(rng, 0.01, 1.0),
        idle_std: uniform(rng, 0.001, 0.1),
        idle_max: uniform(rng, 0.1, 2.0),
        idle_min: uniform(rng, 0.001, 0.1),
    }
}

/// `count` flows of one kind
pub fn generate<R: Rng + ?Sized>(rng: &mut R, kind: TrafficKind, count: usize) -> Vec<LabelledFlow> {
    (0..count)
        .map(|_| {
            let flow = match kind {
                TrafficKind::Normal => normal_flow(rng),
                _ => attack_flow(rng, kind),
            };
            LabelledFlow { flow, kind }
        })
        .collect()
}

/// Combined dataset in the 10:5:3:2 normal/ddos/portscan/generic proportion
pub fn generate_mixed<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<LabelledFlow> {
    let ddos = count / 4;
    let portscan = count * 3 / 20;
    let generic = count / 10;
    let normal = count - ddos - portscan - generic;

    let mut flows = generate(rng, TrafficKind::Normal, normal);
    flows.extend(generate(rng, TrafficKind::Ddos, ddos));
    flows.extend(generate(rng, TrafficKind::Portscan, portscan));
    flows.extend(generate(rng, TrafficKind::Generic, generic));
    flows
}

/// Write flows as CSV: schema columns then the label column
pub fn write_csv(path: &Path, flows: &[LabelledFlow]) -> IdpsResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header: Vec<&str> = FEATURE_LAYOUT.to_vec();
    header.push(LABEL_COLUMN);
    writer.write_record(&header)?;

    for labelled in flows {
        let mut row: Vec<String> = labelled.flow.values().iter().map(|v| v.to_string()).collect();
        row.push(labelled.kind.label().to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    log::info!("Saved {} samples to {}", flows.len(), path.display());
    Ok(())
}
