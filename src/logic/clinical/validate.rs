//! Domain validation for clinical inputs
//!
//! Runs BEFORE encoding, never inside the model call. The first offending
//! field is reported by name so the caller can re-prompt for it.

use super::record::RawClinicalRecord;

/// Allowed range of a numeric clinical field (inclusive both ends)
#[derive(Debug, Clone, Copy)]
pub struct FieldDomain {
    pub field: &'static str,
    pub min: f32,
    pub max: f32,
}

impl FieldDomain {
    const fn new(field: &'static str, min: f32, max: f32) -> Self {
        Self { field, min, max }
    }

    /// Check a value against this domain
    pub fn check(&self, value: f32) -> Result<(), ValidationError> {
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

pub const AGE: FieldDomain = FieldDomain::new("age", 30.0, 80.0);
pub const BMI: FieldDomain = FieldDomain::new("bmi", 15.0, 40.0);
pub const GLUCOSE: FieldDomain = FieldDomain::new("glucose", 60.0, 300.0);
pub const TOTAL_CHOLESTEROL: FieldDomain = FieldDomain::new("total_cholesterol", 100.0, 600.0);
pub const HEART_RATE: FieldDomain = FieldDomain::new("heart_rate", 50.0, 120.0);
pub const SYSTOLIC_BP: FieldDomain = FieldDomain::new("systolic_bp", 80.0, 200.0);
pub const DIASTOLIC_BP: FieldDomain = FieldDomain::new("diastolic_bp", 60.0, 120.0);
pub const CIGARETTES_PER_DAY: FieldDomain = FieldDomain::new("cigarettes_per_day", 0.0, 40.0);

/// All numeric domains, for display/documentation of the caller boundary
pub const DOMAINS: &[FieldDomain] = &[
    AGE,
    BMI,
    GLUCOSE,
    TOTAL_CHOLESTEROL,
    HEART_RATE,
    SYSTOLIC_BP,
    DIASTOLIC_BP,
    CIGARETTES_PER_DAY,
];

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone)]
pub enum ValidationError {
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    Malformed(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::OutOfRange { field, value, min, max } => {
                write!(
                    f,
                    "Validation Error: field `{}` = {} outside allowed range [{}, {}]",
                    field, value, min, max
                )
            }
            ValidationError::Malformed(msg) => write!(f, "Validation Error: malformed record: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Malformed(err.to_string())
    }
}

impl ValidationError {
    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::Malformed(_) => None,
        }
    }
}

// ============================================================================
// RECORD VALIDATION
// ============================================================================

/// Validate every numeric field of a record against its domain
pub fn validate_record(record: &RawClinicalRecord) -> Result<(), ValidationError> {
    AGE.check(record.age as f32)?;
    BMI.check(record.bmi)?;
    GLUCOSE.check(record.glucose)?;
    TOTAL_CHOLESTEROL.check(record.total_cholesterol)?;
    HEART_RATE.check(record.heart_rate as f32)?;
    SYSTOLIC_BP.check(record.systolic_bp)?;
    DIASTOLIC_BP.check(record.diastolic_bp)?;
    CIGARETTES_PER_DAY.check(record.cigarettes_per_day as f32)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_check_bounds_inclusive() {
        assert!(AGE.check(30.0).is_ok());
        assert!(AGE.check(80.0).is_ok());
        assert!(AGE.check(29.0).is_err());
        assert!(AGE.check(81.0).is_err());
    }

    #[test]
    fn test_age_below_minimum_names_field() {
        let mut record = RawClinicalRecord::default();
        record.age = 29;

        let err = validate_record(&record).unwrap_err();
        match err {
            ValidationError::OutOfRange { field, value, min, max } => {
                assert_eq!(field, "age");
                assert_eq!(value, 29.0);
                assert_eq!(min, 30.0);
                assert_eq!(max, 80.0);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_error_reports_field_name() {
        let err = SYSTOLIC_BP.check(250.0).unwrap_err();
        assert_eq!(err.field(), Some("systolic_bp"));
        assert!(err.to_string().contains("systolic_bp"));
    }

    #[test]
    fn test_all_domains_listed() {
        assert_eq!(DOMAINS.len(), 8);
        assert!(DOMAINS.iter().any(|d| d.field == "glucose"));
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_record(&RawClinicalRecord::default()).is_ok());
    }
}
