//! Flow Record - typed input for scoring and rule evaluation
//!
//! One field per schema feature, generated from a single name list so the
//! struct, the layout order and the by-name lookup can never drift apart.

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;

macro_rules! flow_record {
    ($($field:ident),+ $(,)?) => {
        /// Pre-aggregated statistics of one network flow.
        ///
        /// Built only by the schema validator (or tests/generators), so every
        /// feature is always present.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct FlowRecord {
            $(pub $field: f64,)+
        }

        /// Field names in declaration order (the schema layout)
        pub(crate) const FLOW_FIELDS: [&str; FEATURE_COUNT] = [$(stringify!($field)),+];

        impl FlowRecord {
            /// Feature by schema name
            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $(stringify!($field) => Some(self.$field),)+
                    _ => None,
                }
            }

            /// Values in layout order
            pub fn values(&self) -> [f64; FEATURE_COUNT] {
                [$(self.$field),+]
            }

            /// Build from values in layout order
            pub fn from_values(values: &[f64; FEATURE_COUNT]) -> Self {
                let mut iter = values.iter().copied();
                Self {
                    $($field: iter.next().unwrap_or_default(),)+
                }
            }
        }
    };
}

flow_record! {
    destination_port,
    flow_duration,
    total_fwd_packets,
    total_backward_packets,
    total_length_fwd_packets,
    total_length_bwd_packets,
    fwd_packet_length_max,
    fwd_packet_length_min,
    fwd_packet_length_mean,
    fwd_packet_length_std,
    bwd_packet_length_max,
    bwd_packet_length_min,
    bwd_packet_length_mean,
    bwd_packet_length_std,
    flow_bytes_per_sec,
    flow_packets_per_sec,
    flow_iat_mean,
    flow_iat_std,
    flow_iat_max,
    flow_iat_min,
    fwd_iat_total,
    fwd_iat_mean,
    fwd_iat_std,
    fwd_iat_max,
    fwd_iat_min,
    bwd_iat_total,
    bwd_iat_mean,
    bwd_iat_std,
    bwd_iat_max,
    bwd_iat_min,
    fwd_psh_flags,
    bwd_psh_flags,
    fwd_urg_flags,
    bwd_urg_flags,
    fwd_header_length,
    bwd_header_length,
    fwd_packets_per_sec,
    bwd_packets_per_sec,
    min_packet_length,
    max_packet_length,
    packet_length_mean,
    packet_length_std,
    packet_length_variance,
    fin_flag_count,
    syn_flag_count,
    rst_flag_count,
    psh_flag_count,
    ack_flag_count,
    urg_flag_count,
    cwe_flag_count,
    ece_flag_count,
    down_up_ratio,
    average_packet_size,
    avg_fwd_segment_size,
    avg_bwd_segment_size,
    fwd_header_length_1,
    fwd_avg_bytes_per_bulk,
    fwd_avg_packets_per_bulk,
    fwd_avg_bulk_rate,
    bwd_avg_bytes_per_bulk,
    bwd_avg_packets_per_bulk,
    bwd_avg_bulk_rate,
    subflow_fwd_packets,
    subflow_fwd_bytes,
    subflow_bwd_packets,
    subflow_bwd_bytes,
    init_win_bytes_forward,
    init_win_bytes_backward,
    act_data_pkt_fwd,
    min_seg_size_forward,
    active_mean,
    active_std,
    active_max,
    active_min,
    idle_mean,
    idle_std,
    idle_max,
    idle_min,
}

impl FlowRecord {
    /// Model input: `f32` values in layout order
    pub fn to_vector(&self) -> Vec<f32> {
        self.values().iter().map(|&v| v as f32).collect()
    }

    /// Destination port as an integer, if the value is a whole number in range
    pub fn port(&self) -> Option<u16> {
        let port = self.destination_port;
        if port.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(&port) {
            Some(port as u16)
        } else {
            None
        }
    }
}
