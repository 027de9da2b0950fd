//! Features Module - Feature Encoding Engine
//!
//! Owns the feature schema (layout + versioning) and the deterministic
//! mapping from clinical records into the classifier's column order.

pub mod encode;
pub mod layout;
pub mod vector;


// Re-export common types
pub use encode::encode_record;
pub use layout::{
    validate_feature_names, LayoutInfo, LayoutMismatchError, SchemaMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
