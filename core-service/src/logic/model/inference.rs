//! Inference Engine - ONNX Runtime Integration
//!
//! Adapter for an ONNX export of the binary attack model.
//! Input: one `(1, 78)` f32 row in layout order. Output: the attack probability.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::features::{layout_hash, FlowRecord, FEATURE_COUNT, FEATURE_VERSION};
use super::scorer::{checked_probability, ProbabilityScorer, ScoreError};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub features: usize,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelMetadata {
    pub fn new(model_path: String) -> Self {
        Self {
            model_path,
            features: FEATURE_COUNT,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            loaded_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// ONNX SCORER
// ============================================================================

/// ONNX-backed probability scorer
///
/// `Session::run` needs exclusive access, so parallel scoring serializes on
/// the session lock.
pub struct OnnxScorer {
    session: Mutex<Session>,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxScorer {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> Result<Self, ScoreError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ScoreError(format!("Model not found: {}", model_path.display())));
        }

        let session = Session::builder()
            .map_err(|e| ScoreError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ScoreError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ScoreError(format!("Failed to load model: {}", e)))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self::with_session(session, model_path.display().to_string()))
    }

    fn with_session(session: Session, model_path: String) -> Self {
        Self {
            session: Mutex::new(session),
            metadata: ModelMetadata::new(model_path),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    fn run(&self, flow: &FlowRecord) -> Result<f64, ScoreError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), flow.to_vector())
            .map_err(|e| ScoreError(format!("Array error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ScoreError("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ScoreError(format!("Tensor error: {}", e)))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ScoreError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| ScoreError("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| ScoreError(format!("Extract error: {}", e)))?;

        // Sigmoid head: a single probability per row
        let probability = output_tensor.1.first()
            .copied()
            .ok_or_else(|| ScoreError("Empty output tensor".to_string()))?;

        Ok(probability as f64)
    }
}

impl ProbabilityScorer for OnnxScorer {
    fn name(&self) -> &str {
        "onnx"
    }

    fn score(&self, flow: &FlowRecord) -> Result<f64, ScoreError> {
        let start_time = std::time::Instant::now();
        let result = self.run(flow).and_then(checked_probability);

        self.latency_sum_us.fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        result
    }

    fn model_metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }

    /// Average inference latency in milliseconds
    fn avg_latency_ms(&self) -> Option<f64> {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        (count > 0).then(|| (sum as f64 / count as f64) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let err = OnnxScorer::load(Path::new("/nonexistent/model.onnx")).err().unwrap();
        assert!(err.0.contains("Model not found"));
    }

    #[test]
    fn test_metadata_tracks_layout() {
        let meta = ModelMetadata::new("x.onnx".to_string());
        assert_eq!(meta.features, FEATURE_COUNT);
        assert_eq!(meta.layout_hash, layout_hash());
    }
}
