//! CHD Risk Core - 10-Year Coronary Heart Disease Risk Scoring
//!
//! Deterministic pipeline from a raw clinical record to a risk verdict:
//!
//! ```text
//! RawClinicalRecord → encode_record → FeatureVector → RiskModel → RiskVerdict
//! ```
//!
//! The trained classifier is an externally supplied ONNX artifact, loaded
//! once at startup. Its declared training columns are checked against the
//! encoder's fixed layout at load time; a mismatch is fatal, never silent.
//!
//! ```no_run
//! use chd_risk_core::{RawClinicalRecord, RiskModel, ScoringConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScoringConfig::from_env();
//! let model = RiskModel::load(&config.model_path)?;
//!
//! let record = RawClinicalRecord::default();
//! let verdict = model.score_record(&record)?;
//! println!("{} ({})", verdict.probability_percent(), verdict.label);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod logic;

// Re-export the pipeline surface
pub use error::{RiskError, RiskResult};
pub use logic::clinical::{RawClinicalRecord, Sex, ValidationError, YesNo};
pub use logic::config::ScoringConfig;
pub use logic::features::{
    encode_record, FeatureVector, FeatureVectorBuilder, LayoutInfo, SchemaMismatchError,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use logic::model::{
    ModelError, ModelMetadata, RiskLabel, RiskModel, RiskVerdict, ScorerStatus, ThresholdPolicy,
};
