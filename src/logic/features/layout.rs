//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The order below is a binding contract with the trained classifier:
//! reordering silently corrupts predictions without any runtime signal,
//! which is exactly why the model's declared training columns are checked
//! against this layout at load time, not per request.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Training column names in the exact order the classifier expects.
/// This is the SINGLE SOURCE OF TRUTH for feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Demographics (0-1) ===
    "male",            // 0: Sex, Male=1 Female=0
    "age",             // 1: Age in years

    // === Smoking (2-3) ===
    "currentSmoker",   // 2: Currently smoking, Yes=1
    "cigsPerDay",      // 3: Cigarettes per day

    // === History (4-7) ===
    "BPMeds",          // 4: On blood pressure medication, Yes=1
    "prevalentStroke", // 5: Prior stroke, Yes=1
    "prevalentHyp",    // 6: Diagnosed hypertension, Yes=1
    "diabetes",        // 7: Diagnosed diabetes, Yes=1

    // === Vitals (8-13) ===
    "totChol",         // 8: Total cholesterol, mg/dL
    "sysBP",           // 9: Systolic blood pressure, mmHg
    "diaBP",           // 10: Diastolic blood pressure, mmHg
    "BMI",             // 11: Body mass index, kg/m²
    "heartRate",       // 12: Resting heart rate, bpm
    "glucose",         // 13: Blood glucose, mg/dL
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 14;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (computed once, inputs are const)
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a serialized vector doesn't match the current layout
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// SCHEMA VALIDATION (model-declared columns)
// ============================================================================

/// Error when the model's declared training columns don't match FEATURE_LAYOUT
#[derive(Debug, Clone)]
pub struct SchemaMismatchError {
    pub expected: Vec<String>,
    pub declared: Vec<String>,
    /// Index of the first divergence, if both lists reach it
    pub divergence: Option<usize>,
}

impl std::fmt::Display for SchemaMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.declared.is_empty() {
            return write!(
                f,
                "Schema mismatch: model declares no feature names (expected {} columns)",
                self.expected.len()
            );
        }
        match self.divergence {
            Some(i) => write!(
                f,
                "Schema mismatch at column {}: expected `{}`, model declares `{}`",
                i,
                self.expected.get(i).map(String::as_str).unwrap_or("<none>"),
                self.declared.get(i).map(String::as_str).unwrap_or("<none>"),
            ),
            None => write!(
                f,
                "Schema mismatch: expected {} columns, model declares {}",
                self.expected.len(),
                self.declared.len()
            ),
        }
    }
}

impl std::error::Error for SchemaMismatchError {}

/// Check the model's declared training columns against FEATURE_LAYOUT.
///
/// Called once at model load. A model that declares nothing fails too:
/// silence is indistinguishable from misalignment and must not serve.
pub fn validate_feature_names(declared: &[String]) -> Result<(), SchemaMismatchError> {
    let matches = declared.len() == FEATURE_COUNT
        && declared.iter().zip(FEATURE_LAYOUT.iter()).all(|(d, e)| d == e);
    if matches {
        return Ok(());
    }

    let divergence = declared
        .iter()
        .zip(FEATURE_LAYOUT.iter())
        .position(|(d, e)| d != e);

    Err(SchemaMismatchError {
        expected: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        declared: declared.to_vec(),
        divergence,
    })
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 14);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_order_is_the_training_order() {
        assert_eq!(FEATURE_LAYOUT[0], "male");
        assert_eq!(FEATURE_LAYOUT[1], "age");
        assert_eq!(FEATURE_LAYOUT[8], "totChol");
        assert_eq!(FEATURE_LAYOUT[13], "glucose");
    }

    #[test]
    fn test_layout_hash_consistency() {
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
        assert_eq!(layout_hash(), hash1);
    }

    #[test]
    fn test_layout_hash_non_zero() {
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout_success() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_validate_feature_names_exact_match() {
        let declared: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        assert!(validate_feature_names(&declared).is_ok());
    }

    #[test]
    fn test_validate_feature_names_swapped_order() {
        // First two columns swapped: [age, male, ...]
        let mut declared: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        declared.swap(0, 1);

        let err = validate_feature_names(&declared).unwrap_err();
        assert_eq!(err.divergence, Some(0));
        assert!(err.to_string().contains("male"));
    }

    #[test]
    fn test_validate_feature_names_wrong_count() {
        let declared: Vec<String> = FEATURE_LAYOUT[..10].iter().map(|s| s.to_string()).collect();
        let err = validate_feature_names(&declared).unwrap_err();
        assert_eq!(err.divergence, None);
    }

    #[test]
    fn test_validate_feature_names_empty() {
        let err = validate_feature_names(&[]).unwrap_err();
        assert!(err.declared.is_empty());
        assert!(err.to_string().contains("declares no feature names"));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("male"), Some(0));
        assert_eq!(feature_index("totChol"), Some(8));
        assert_eq!(feature_index("glucose"), Some(13));
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("male"));
        assert_eq!(feature_name(13), Some("glucose"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
