//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the trained CHD classifier and exposes probability scoring.
//! The session is owned by `RiskModel`, constructed once at startup and
//! shared read-only; nothing here mutates model state after load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::constants::FEATURE_NAMES_METADATA_KEY;
use crate::error::RiskError;
use crate::logic::clinical::RawClinicalRecord;
use crate::logic::features::{
    encode_record, layout::validate_feature_names, FeatureVector, LayoutMismatchError,
    SchemaMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
};

use super::threshold::{RiskLabel, ThresholdPolicy};

/// Output tensor name emitted by sklearn→ONNX classifier conversions
const PROBABILITIES_OUTPUT: &str = "probabilities";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub feature_count: usize,
    pub threshold: f32,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Scoring output for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Calibrated probability of a CHD event within 10 years (0.0 - 1.0)
    pub probability: f32,
    pub label: RiskLabel,
    pub threshold: f32,
    pub inference_time_us: u64,
}

impl RiskVerdict {
    /// One-decimal percent string, e.g. "12.3%"
    pub fn probability_percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// Engine status for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerStatus {
    pub model_loaded: bool,
    pub model_path: String,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum ModelError {
    /// Artifact missing or unloadable; fatal at startup
    Unavailable(String),
    /// Declared training columns don't match the encoder layout; fatal at startup
    SchemaMismatch(SchemaMismatchError),
    /// Vector was built against a different feature layout version
    LayoutMismatch(LayoutMismatchError),
    /// Runtime failure inside the ONNX session
    Inference(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Unavailable(msg) => write!(f, "Model unavailable: {}", msg),
            ModelError::SchemaMismatch(e) => write!(f, "{}", e),
            ModelError::LayoutMismatch(e) => write!(f, "{}", e),
            ModelError::Inference(msg) => write!(f, "Inference Error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<SchemaMismatchError> for ModelError {
    fn from(err: SchemaMismatchError) -> Self {
        ModelError::SchemaMismatch(err)
    }
}

impl From<LayoutMismatchError> for ModelError {
    fn from(err: LayoutMismatchError) -> Self {
        ModelError::LayoutMismatch(err)
    }
}

// ============================================================================
// RISK MODEL
// ============================================================================

/// Trained CHD classifier, loaded once and shared read-only.
///
/// The `Mutex` exists only because `Session::run` takes `&mut self`;
/// no request mutates model state. Share across threads via `Arc`.
pub struct RiskModel {
    session: Mutex<Session>,
    metadata: ModelMetadata,
    policy: ThresholdPolicy,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl RiskModel {
    /// Load the classifier artifact from a file and verify its schema.
    ///
    /// Fatal on a missing/unreadable artifact or a feature-order mismatch;
    /// the process must not serve predictions in either case.
    pub fn load(model_path: &str) -> Result<Self, ModelError> {
        log::info!("Loading CHD model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(ModelError::Unavailable(format!(
                "Model not found: {}",
                model_path
            )));
        }

        let session = Session::builder()
            .map_err(|e| ModelError::Unavailable(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Unavailable(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Unavailable(format!("Failed to load model: {}", e)))?;

        Self::from_session(session, model_path.to_string())
    }

    /// Load the classifier artifact from memory and verify its schema.
    pub fn load_from_bytes(model_bytes: &[u8]) -> Result<Self, ModelError> {
        log::info!("Loading CHD model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ModelError::Unavailable(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Unavailable(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::Unavailable(format!("Failed to load model from memory: {}", e)))?;

        Self::from_session(session, "<memory>".to_string())
    }

    fn from_session(session: Session, model_path: String) -> Result<Self, ModelError> {
        // Schema check happens here, once, before any request is served.
        let declared = declared_feature_names(&session)?;
        validate_feature_names(&declared)?;

        log::info!(
            "CHD model loaded, schema verified ({} columns)",
            FEATURE_COUNT
        );

        let policy = ThresholdPolicy::default();
        let metadata = ModelMetadata {
            model_path,
            feature_count: FEATURE_COUNT,
            threshold: policy.cutoff,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            session: Mutex::new(session),
            metadata,
            policy,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    /// Model metadata captured at load time
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Training column order the model was verified against
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Probability of the positive class (CHD event within 10 years).
    ///
    /// Pure given the loaded model: the same vector always scores the
    /// same probability. Only the latency metrics are updated.
    pub fn score(&self, vector: &FeatureVector) -> Result<f32, ModelError> {
        let start_time = std::time::Instant::now();

        vector.validate()?;

        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            vector.as_slice().to_vec(),
        )
        .map_err(|e| ModelError::Inference(format!("Failed to create array: {}", e)))?;

        let mut session = self.session.lock();

        // Get output name BEFORE run to avoid borrow conflict
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITIES_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Inference("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Inference(format!("Failed to create tensor: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| ModelError::Inference("No output from model".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(format!("Failed to extract output: {}", e)))?;

        let data = output_tensor.1;
        let probability = positive_class_probability(data)?;

        // Track metrics
        let inference_time = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(inference_time, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "Scored vector in {}us: p={:.4}",
            inference_time,
            probability
        );

        Ok(probability)
    }

    /// Score a vector and apply the decision threshold.
    pub fn verdict(&self, vector: &FeatureVector) -> Result<RiskVerdict, ModelError> {
        let start_time = std::time::Instant::now();
        let probability = self.score(vector)?;
        let label = self.policy.classify(probability);

        Ok(RiskVerdict {
            probability,
            label,
            threshold: self.policy.cutoff,
            inference_time_us: start_time.elapsed().as_micros() as u64,
        })
    }

    /// Full pipeline: validate → encode → score → label.
    pub fn score_record(&self, record: &RawClinicalRecord) -> Result<RiskVerdict, RiskError> {
        let vector = encode_record(record)?;
        Ok(self.verdict(&vector)?)
    }

    /// Async embedding helper: same scoring, moved onto a blocking thread.
    pub async fn verdict_async(
        self: Arc<Self>,
        vector: FeatureVector,
    ) -> Result<RiskVerdict, ModelError> {
        tokio::task::spawn_blocking(move || self.verdict(&vector))
            .await
            .map_err(|e| ModelError::Inference(format!("Task failed: {}", e)))?
    }

    /// Engine status for monitoring
    pub fn status(&self) -> ScorerStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        ScorerStatus {
            model_loaded: true,
            model_path: self.metadata.model_path.clone(),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Read the training columns the artifact declares in its custom metadata.
///
/// Accepts a JSON string array or a comma-separated list. An artifact that
/// declares nothing yields an empty list, which then fails the schema check.
fn declared_feature_names(session: &Session) -> Result<Vec<String>, ModelError> {
    let metadata = session
        .metadata()
        .map_err(|e| ModelError::Unavailable(format!("Failed to read model metadata: {}", e)))?;

    let raw = metadata
        .custom(FEATURE_NAMES_METADATA_KEY)
        .map_err(|e| ModelError::Unavailable(format!("Failed to read model metadata: {}", e)))?;

    match raw {
        Some(value) => Ok(parse_feature_names(&value)),
        None => Ok(Vec::new()),
    }
}

fn parse_feature_names(raw: &str) -> Vec<String> {
    if let Ok(names) = serde_json::from_str::<Vec<String>>(raw) {
        return names;
    }
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Positive-class probability from the classifier output.
///
/// Two-class converters emit `[p_negative, p_positive]`; index 1 is the
/// positive class. A single value is an already-sigmoid positive
/// probability.
fn positive_class_probability(data: &[f32]) -> Result<f32, ModelError> {
    let probability = match data.len() {
        0 => {
            return Err(ModelError::Inference(
                "Empty probability output".to_string(),
            ))
        }
        1 => data[0],
        _ => data[1],
    };
    Ok(probability.clamp(0.0, 1.0))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_artifact() {
        let result = RiskModel::load("no/such/model.onnx");
        match result {
            Err(ModelError::Unavailable(msg)) => assert!(msg.contains("Model not found")),
            _ => panic!("expected Unavailable for missing artifact"),
        }
    }

    #[test]
    fn test_parse_feature_names_json() {
        let names = parse_feature_names(r#"["male","age","glucose"]"#);
        assert_eq!(names, vec!["male", "age", "glucose"]);
    }

    #[test]
    fn test_parse_feature_names_csv() {
        let names = parse_feature_names("male, age,glucose");
        assert_eq!(names, vec!["male", "age", "glucose"]);
    }

    #[test]
    fn test_positive_class_probability() {
        assert_eq!(positive_class_probability(&[0.8, 0.2]).unwrap(), 0.2);
        assert_eq!(positive_class_probability(&[0.45]).unwrap(), 0.45);
        assert!(positive_class_probability(&[]).is_err());
    }

    #[test]
    fn test_probability_is_clamped() {
        // Float noise just past 1.0 must not escape the [0, 1] contract
        assert_eq!(positive_class_probability(&[-0.000001, 1.000001]).unwrap(), 1.0);
    }

    #[test]
    fn test_verdict_percent_formatting() {
        let verdict = RiskVerdict {
            probability: 0.1234,
            label: RiskLabel::LowRisk,
            threshold: 0.30,
            inference_time_us: 42,
        };
        assert_eq!(verdict.probability_percent(), "12.3%");
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::Unavailable("Model not found: x.onnx".to_string());
        assert!(err.to_string().contains("Model unavailable"));
    }
}
