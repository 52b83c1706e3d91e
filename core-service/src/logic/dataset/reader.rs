//! Batch reader - CSV bytes to raw header/row mappings
//!
//! No interpretation happens here: values stay strings until the schema
//! validator checks them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IdpsResult;
use crate::logic::features::{FlowRecord, FEATURE_LAYOUT};

/// One uploaded batch: column names and raw cell values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatch {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawBatch {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw value of `column` in row `index` (0-based)
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == column)?;
        self.rows.get(index)?.get(col).map(String::as_str)
    }

    /// Batch with exactly the schema columns, one row per flow
    pub fn from_flows(flows: &[FlowRecord]) -> Self {
        let headers = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        let rows = flows
            .iter()
            .map(|flow| flow.values().iter().map(|v| v.to_string()).collect())
            .collect();
        Self { headers, rows }
    }
}

/// Parse a CSV batch; ragged rows and invalid UTF-8 are parse errors
pub fn read_batch<R: Read>(reader: R) -> IdpsResult<RawBatch> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    log::debug!("Read batch: {} columns, {} rows", headers.len(), rows.len());
    Ok(RawBatch { headers, rows })
}

pub fn read_batch_from_bytes(bytes: &[u8]) -> IdpsResult<RawBatch> {
    read_batch(bytes)
}

pub fn read_batch_from_path(path: &Path) -> IdpsResult<RawBatch> {
    let file = File::open(path)?;
    read_batch(file)
}
