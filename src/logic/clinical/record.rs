//! Raw Clinical Record - one per prediction request
//!
//! Field domains and defaults mirror the intake form ranges. The record is
//! strongly typed so a malformed category cannot be constructed; numeric
//! domains are enforced by `validate()` before encoding.

use serde::{Deserialize, Serialize};

use super::validate::{self, ValidationError};

/// Binary categorical answer as collected by the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    /// Model encoding: Yes -> 1.0, No -> 0.0
    pub fn as_feature(self) -> f32 {
        match self {
            YesNo::Yes => 1.0,
            YesNo::No => 0.0,
        }
    }
}

/// Patient sex as collected by the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Model encoding: Male -> 1.0, Female -> 0.0
    pub fn as_feature(self) -> f32 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }
}

/// Raw clinical input, human-friendly units
///
/// Units: age in years, glucose / total_cholesterol in mg/dL, blood
/// pressure in mmHg, heart_rate in bpm, bmi in kg/m².
/// `cigarettes_per_day` is only meaningful when `current_smoker` is Yes
/// but is always transmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClinicalRecord {
    pub age: u32,
    pub sex: Sex,
    pub bmi: f32,
    pub glucose: f32,
    pub prior_stroke: YesNo,
    pub hypertension: YesNo,
    pub total_cholesterol: f32,
    pub heart_rate: u32,
    pub systolic_bp: f32,
    pub diastolic_bp: f32,
    pub bp_medication: YesNo,
    pub current_smoker: YesNo,
    pub cigarettes_per_day: u32,
    pub diabetes: bool,
}

impl RawClinicalRecord {
    /// Check every numeric field against its declared domain.
    ///
    /// No clamping: an out-of-domain value is an error, never adjusted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_record(self)
    }

    /// Parse a record from the caller boundary and validate it.
    ///
    /// Missing or ill-typed fields surface as `ValidationError::Malformed`,
    /// out-of-domain values as `ValidationError::OutOfRange`.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let record: Self = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }
}

impl Default for RawClinicalRecord {
    /// Intake form defaults
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::Female,
            bmi: 25.0,
            glucose: 100.0,
            prior_stroke: YesNo::No,
            hypertension: YesNo::No,
            total_cholesterol: 200.0,
            heart_rate: 75,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            bp_medication: YesNo::No,
            current_smoker: YesNo::No,
            cigarettes_per_day: 0,
            diabetes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_valid() {
        let record = RawClinicalRecord::default();
        assert!(record.validate().is_ok());
        assert_eq!(record.age, 45);
        assert_eq!(record.bmi, 25.0);
        assert_eq!(record.heart_rate, 75);
    }

    #[test]
    fn test_categorical_encoding() {
        assert_eq!(Sex::Male.as_feature(), 1.0);
        assert_eq!(Sex::Female.as_feature(), 0.0);
        assert_eq!(YesNo::Yes.as_feature(), 1.0);
        assert_eq!(YesNo::No.as_feature(), 0.0);
    }

    #[test]
    fn test_from_json_roundtrip() {
        let record = RawClinicalRecord::default();
        let json = serde_json::to_string(&record).unwrap();
        let parsed = RawClinicalRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_from_json_missing_field() {
        let result = RawClinicalRecord::from_json(r#"{"age": 45}"#);
        match result {
            Err(ValidationError::Malformed(_)) => {}
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_out_of_domain() {
        let mut record = RawClinicalRecord::default();
        record.glucose = 500.0;
        let json = serde_json::to_string(&record).unwrap();
        let result = RawClinicalRecord::from_json(&json);
        match result {
            Err(ValidationError::OutOfRange { field, .. }) => {
                assert_eq!(field, "glucose");
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }
}
