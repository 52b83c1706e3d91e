//! Dataset Module - Batch Input & Synthetic Data
//!
//! Reads uploaded CSV batches into raw rows and generates labelled
//! synthetic batches in the same format.

pub mod reader;
pub mod generator;

#[cfg(test)]
mod tests;

pub use reader::{read_batch, read_batch_from_bytes, read_batch_from_path, RawBatch};
pub use generator::{generate, generate_mixed, write_csv, LabelledFlow, TrafficKind, LABEL_COLUMN};
