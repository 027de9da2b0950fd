//! Model Module - Risk Classifier Adapter
//!
//! Wraps the trained probabilistic classifier behind a single scoring
//! operation and applies the fixed decision threshold.

pub mod inference;
pub mod threshold;

// Re-export common types
pub use inference::{ModelError, ModelMetadata, RiskModel, RiskVerdict, ScorerStatus};
pub use threshold::{RiskLabel, ThresholdPolicy};
