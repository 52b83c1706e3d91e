//! Logic Module - Detection Pipeline
//!
//! ## Architecture
//! - `features/` - Flow feature schema (78 ordered columns, typed record)
//! - `dataset/` - CSV batch reader and synthetic generator
//! - `validate` - Schema validation under the record policy
//! - `model/` - Probability scoring (ONNX adapter, fallback heuristic, threshold)
//! - `threat/` - Attack-type rule cascade
//! - `report/` - Aggregation, mitigation advice, rendering
//! - `pipeline` - Wires the stages together for one batch

pub mod config;
pub mod features;
pub mod dataset;
pub mod validate;
pub mod model;
pub mod threat;
pub mod report;
pub mod pipeline;
