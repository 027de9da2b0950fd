//! Configuration module

use crate::constants;

/// Scoring service configuration
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Path of the trained classifier artifact (ONNX)
    pub model_path: String,
}

impl ScoringConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: constants::get_model_path(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_bundled_model() {
        let config = ScoringConfig::default();
        assert_eq!(config.model_path, constants::DEFAULT_MODEL_PATH);
    }
}
