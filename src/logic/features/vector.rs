//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// This struct MUST be used for all feature data to ensure compatibility.
/// Never pass raw `Vec<f32>` or `[f32; N]` to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
///
/// Setter names follow the training columns, not the intake field names.
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
        }
    }

    // Demographics
    pub fn male(mut self, value: f32) -> Self {
        self.vector.set_by_name("male", value);
        self
    }

    pub fn age(mut self, value: f32) -> Self {
        self.vector.set_by_name("age", value);
        self
    }

    // Smoking
    pub fn current_smoker(mut self, value: f32) -> Self {
        self.vector.set_by_name("currentSmoker", value);
        self
    }

    pub fn cigs_per_day(mut self, value: f32) -> Self {
        self.vector.set_by_name("cigsPerDay", value);
        self
    }

    // History
    pub fn bp_meds(mut self, value: f32) -> Self {
        self.vector.set_by_name("BPMeds", value);
        self
    }

    pub fn prevalent_stroke(mut self, value: f32) -> Self {
        self.vector.set_by_name("prevalentStroke", value);
        self
    }

    pub fn prevalent_hyp(mut self, value: f32) -> Self {
        self.vector.set_by_name("prevalentHyp", value);
        self
    }

    pub fn diabetes(mut self, value: f32) -> Self {
        self.vector.set_by_name("diabetes", value);
        self
    }

    // Vitals
    pub fn tot_chol(mut self, value: f32) -> Self {
        self.vector.set_by_name("totChol", value);
        self
    }

    pub fn sys_bp(mut self, value: f32) -> Self {
        self.vector.set_by_name("sysBP", value);
        self
    }

    pub fn dia_bp(mut self, value: f32) -> Self {
        self.vector.set_by_name("diaBP", value);
        self
    }

    pub fn bmi(mut self, value: f32) -> Self {
        self.vector.set_by_name("BMI", value);
        self
    }

    pub fn heart_rate(mut self, value: f32) -> Self {
        self.vector.set_by_name("heartRate", value);
        self
    }

    pub fn glucose(mut self, value: f32) -> Self {
        self.vector.set_by_name("glucose", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f32) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .age(55.0)
            .tot_chol(240.0)
            .build();

        assert_eq!(vector.get_by_name("age"), Some(55.0));
        assert_eq!(vector.get_by_name("totChol"), Some(240.0));
    }

    #[test]
    fn test_feature_vector_set_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("glucose", 110.0));
        assert_eq!(vector.get_by_name("glucose"), Some(110.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_feature_vector_validation() {
        let vector = FeatureVector::new();
        assert!(vector.is_compatible());
        assert!(vector.validate().is_ok());

        let mut stale = FeatureVector::new();
        stale.version = FEATURE_VERSION + 1;
        assert!(!stale.is_compatible());
    }

    #[test]
    fn test_feature_vector_from_array() {
        let array = [1.0; FEATURE_COUNT];
        let vector: FeatureVector = array.into();

        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.values, array);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVectorBuilder::new().age(55.0).build();

        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(log["named_values"]["age"], 55.0);
    }
}
