//! Error handling

use crate::logic::clinical::ValidationError;
use crate::logic::model::ModelError;

pub type RiskResult<T> = Result<T, RiskError>;

/// Pipeline-level error for the full record → verdict operation.
///
/// Validation errors are recoverable by resubmission; model errors are
/// fatal at startup and never retried.
#[derive(Debug)]
pub enum RiskError {
    // Input errors (recoverable by the caller)
    Validation(ValidationError),

    // Model errors (fatal at startup, propagated at scoring time)
    Model(ModelError),
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskError::Validation(e) => write!(f, "{}", e),
            RiskError::Model(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RiskError::Validation(e) => Some(e),
            RiskError::Model(e) => Some(e),
        }
    }
}

impl From<ValidationError> for RiskError {
    fn from(err: ValidationError) -> Self {
        RiskError::Validation(err)
    }
}

impl From<ModelError> for RiskError {
    fn from(err: ModelError) -> Self {
        RiskError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::clinical::validate::AGE;

    #[test]
    fn test_validation_error_converts() {
        let err: RiskError = AGE.check(29.0).unwrap_err().into();
        match &err {
            RiskError::Validation(e) => assert_eq!(e.field(), Some("age")),
            other => panic!("expected Validation, got {:?}", other),
        }
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_model_error_converts() {
        let err: RiskError = ModelError::Unavailable("gone".to_string()).into();
        assert!(matches!(err, RiskError::Model(_)));
    }
}
