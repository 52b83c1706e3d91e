//! Batch Pipeline
//!
//! read -> validate -> score -> classify -> summarize
//!
//! The scorer is injected at construction. Records are independent, so
//! scoring may run on the rayon pool; results always come back in input
//! order and failures are resolved by position.

use std::path::Path;

use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{IdpsError, IdpsResult};
use crate::logic::config::{PipelineConfig, RecordPolicy};
use crate::logic::dataset::{read_batch_from_bytes, RawBatch};
use crate::logic::model::{checked_probability, AttackThreshold, ProbabilityScorer};
use crate::logic::report::BatchReport;
use crate::logic::threat::{classify_record, ClassificationResult};
use crate::logic::validate::{validate, IndexedFlow, RejectedRecord};

/// Output of the scoring stage
#[derive(Debug, Clone, Default)]
pub struct ClassifiedBatch {
    pub results: Vec<ClassificationResult>,
    pub rejected: Vec<RejectedRecord>,
}

pub struct Pipeline {
    scorer: Box<dyn ProbabilityScorer>,
    config: PipelineConfig,
    threshold: AttackThreshold,
}

impl Pipeline {
    pub fn new(scorer: Box<dyn ProbabilityScorer>, config: PipelineConfig) -> IdpsResult<Self> {
        config.validate()?;
        let threshold = AttackThreshold::new(config.attack_threshold)?;

        log::info!(
            "Pipeline ready: scorer={} threshold={} policy={} parallel={}",
            scorer.name(),
            threshold.value(),
            config.record_policy,
            config.parallel
        );

        Ok(Self {
            scorer,
            config,
            threshold,
        })
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    fn classify_one(&self, item: &IndexedFlow) -> IdpsResult<ClassificationResult> {
        let probability = self
            .scorer
            .score(&item.flow)
            .and_then(checked_probability)
            .map_err(|e| IdpsError::Scoring {
                id: item.id,
                reason: e.0,
            })?;

        Ok(classify_record(item.id, &item.flow, probability, &self.threshold))
    }

    /// Score and classify validated flows under the record policy
    pub fn classify_batch(&self, flows: &[IndexedFlow]) -> IdpsResult<ClassifiedBatch> {
        let outcomes: Vec<IdpsResult<ClassificationResult>> = if self.config.parallel {
            flows.par_iter().map(|f| self.classify_one(f)).collect()
        } else {
            flows.iter().map(|f| self.classify_one(f)).collect()
        };

        let mut batch = ClassifiedBatch {
            results: Vec::with_capacity(outcomes.len()),
            rejected: Vec::new(),
        };

        for (item, outcome) in flows.iter().zip(outcomes) {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(e) => match self.config.record_policy {
                    RecordPolicy::FailFast => {
                        log::warn!("Batch rejected: {}", e);
                        return Err(e);
                    }
                    RecordPolicy::Skip => {
                        log::warn!("Skipping record {}: {}", item.id, e);
                        batch.rejected.push(RejectedRecord::from_error(item.id, &e));
                    }
                },
            }
        }

        Ok(batch)
    }

    /// Full analysis of an already-parsed batch
    pub fn analyze(&self, raw: &RawBatch) -> IdpsResult<BatchReport> {
        log::info!("Analyzing batch: {} records, {} columns", raw.len(), raw.headers.len());

        let validated = validate(raw, self.config.record_policy)?;
        let classified = self.classify_batch(&validated.flows)?;

        let mut rejected = validated.rejected;
        rejected.extend(classified.rejected);
        rejected.sort_by_key(|r| r.id);

        let report = BatchReport::new(
            self.scorer_name(),
            self.threshold.value(),
            classified.results,
            rejected,
        )
        .with_model(self.scorer.model_metadata().cloned());

        if let Some(ms) = self.scorer.avg_latency_ms() {
            log::info!("Scorer {}: avg latency {:.3} ms", self.scorer_name(), ms);
        }

        log::info!(
            "Batch {}: {} of {} records flagged, {} rejected",
            report.batch_id,
            report.summary.attacks_detected,
            report.summary.total_records,
            report.rejected.len()
        );

        Ok(report)
    }

    /// Parse CSV bytes and analyze; the report carries the input digest
    pub fn analyze_bytes(&self, bytes: &[u8]) -> IdpsResult<BatchReport> {
        let digest = hex::encode(Sha256::digest(bytes));
        let raw = read_batch_from_bytes(bytes)?;
        Ok(self.analyze(&raw)?.with_digest(digest))
    }

    pub fn analyze_path(&self, path: &Path) -> IdpsResult<BatchReport> {
        let bytes = std::fs::read(path)?;
        self.analyze_bytes(&bytes)
    }
}

// ============================================================================
// TESTS
// ============================================================================
