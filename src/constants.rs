//! Central Configuration Constants
//!
//! Single source of truth for all scoring defaults.
//! To change the default model location or threshold, only edit this file.

/// Default path of the trained classifier artifact (ONNX)
///
/// This is the fallback path when no environment variable is set.
pub const DEFAULT_MODEL_PATH: &str = "models/heart_disease_model.onnx";

/// Decision threshold for the 10-year CHD verdict
///
/// Fixed policy constant, intentionally below 0.5: the screening use case
/// trades raw accuracy for sensitivity (fewer missed positives).
/// A probability must be STRICTLY greater than this to classify High Risk.
pub const RISK_THRESHOLD: f32 = 0.30;

/// ONNX custom-metadata key under which the artifact declares the
/// feature names/order it was trained on
pub const FEATURE_NAMES_METADATA_KEY: &str = "feature_names";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "CHD-Risk-Core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("CHD_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}
