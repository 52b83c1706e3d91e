//! Batch report envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::features::LayoutInfo;
use crate::logic::model::ModelMetadata;
use crate::logic::threat::ClassificationResult;
use crate::logic::validate::RejectedRecord;
use super::summary::{summarize, BatchSummary};

/// Everything produced for one uploaded batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub generated_at: DateTime<Utc>,

    /// SHA-256 (hex) of the uploaded bytes, when the batch came from bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_digest: Option<String>,

    pub layout: LayoutInfo,
    /// Name of the scorer that produced the probabilities
    pub scorer: String,
    /// Present when the scorer is backed by a loaded model file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelMetadata>,
    pub attack_threshold: f64,

    pub summary: BatchSummary,
    /// Per-record results in input order
    pub results: Vec<ClassificationResult>,
    /// Records dropped under the skip policy
    #[serde(default)]
    pub rejected: Vec<RejectedRecord>,
}

impl BatchReport {
    pub fn new(
        scorer: impl Into<String>,
        attack_threshold: f64,
        results: Vec<ClassificationResult>,
        rejected: Vec<RejectedRecord>,
    ) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            input_digest: None,
            layout: LayoutInfo::current(),
            scorer: scorer.into(),
            model: None,
            attack_threshold,
            summary: summarize(&results),
            results,
            rejected,
        }
    }

    pub fn with_digest(mut self, digest: String) -> Self {
        self.input_digest = Some(digest);
        self
    }

    pub fn with_model(mut self, model: Option<ModelMetadata>) -> Self {
        self.model = model;
        self
    }
}
