//! Schema Validator
//!
//! Checks a raw batch against the feature schema before any inference.
//! Column set first (whole batch rejected, no partial output), then each
//! record's values under the configured record policy.

use serde::{Deserialize, Serialize};

use crate::error::{IdpsError, IdpsResult};
use crate::logic::config::RecordPolicy;
use crate::logic::dataset::RawBatch;
use crate::logic::features::{missing_features, FlowRecord, FEATURE_COUNT, FEATURE_LAYOUT};

/// A validated flow and its 1-based position in the uploaded batch
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFlow {
    pub id: usize,
    pub flow: FlowRecord,
}

/// A record dropped under the `skip` policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub id: usize,
    pub kind: String,
    pub reason: String,
}

impl RejectedRecord {
    pub fn from_error(id: usize, err: &IdpsError) -> Self {
        Self {
            id,
            kind: err.kind().to_string(),
            reason: err.summary(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidatedBatch {
    pub flows: Vec<IndexedFlow>,
    pub rejected: Vec<RejectedRecord>,
}

/// Parse one cell; integers and floats are accepted, NaN is not
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (!value.is_nan()).then_some(value)
}

/// Check that every required feature column is present
pub fn check_columns(headers: &[String]) -> IdpsResult<[usize; FEATURE_COUNT]> {
    let missing = missing_features(headers);
    if !missing.is_empty() {
        log::warn!("Batch rejected, missing features: {}", missing.join(", "));
        return Err(IdpsError::MissingFeatures { missing });
    }

    let mut columns = [0usize; FEATURE_COUNT];
    for (slot, name) in columns.iter_mut().zip(FEATURE_LAYOUT) {
        // First occurrence wins if a header is duplicated
        *slot = headers.iter().position(|h| h == name).unwrap_or_default();
    }
    Ok(columns)
}

fn parse_row(id: usize, row: &[String], columns: &[usize; FEATURE_COUNT]) -> IdpsResult<FlowRecord> {
    let mut values = [0.0f64; FEATURE_COUNT];

    for (i, &col) in columns.iter().enumerate() {
        let raw = row.get(col).map(String::as_str).unwrap_or("");
        values[i] = parse_numeric(raw).ok_or_else(|| IdpsError::InvalidValue {
            row: id,
            column: FEATURE_LAYOUT[i].to_string(),
            value: raw.to_string(),
        })?;
    }

    Ok(FlowRecord::from_values(&values))
}

/// Validate a batch; extra columns are ignored
pub fn validate(batch: &RawBatch, policy: RecordPolicy) -> IdpsResult<ValidatedBatch> {
    let columns = check_columns(&batch.headers)?;

    let mut validated = ValidatedBatch::default();
    for (index, row) in batch.rows.iter().enumerate() {
        let id = index + 1;
        match parse_row(id, row, &columns) {
            Ok(flow) => validated.flows.push(IndexedFlow { id, flow }),
            Err(e) => match policy {
                RecordPolicy::FailFast => {
                    log::warn!("Batch rejected: {}", e);
                    return Err(e);
                }
                RecordPolicy::Skip => {
                    log::warn!("Skipping record {}: {}", id, e);
                    validated.rejected.push(RejectedRecord::from_error(id, &e));
                }
            },
        }
    }

    Ok(validated)
}
