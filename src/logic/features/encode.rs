//! Feature Encoder - RawClinicalRecord → FeatureVector
//!
//! Deterministic, total (within domain) mapping into the training column
//! order. Binary categories encode Yes/Male as 1.0 and No/Female as 0.0;
//! numeric fields pass through unchanged. No rounding, no unit conversion,
//! no clamping.

use crate::logic::clinical::{RawClinicalRecord, ValidationError};

use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Encode a validated record into the model's feature order.
///
/// Validation runs first; an out-of-domain field fails here and never
/// reaches the classifier.
pub fn encode_record(record: &RawClinicalRecord) -> Result<FeatureVector, ValidationError> {
    record.validate()?;

    Ok(FeatureVectorBuilder::new()
        .male(record.sex.as_feature())
        .age(record.age as f32)
        .current_smoker(record.current_smoker.as_feature())
        .cigs_per_day(record.cigarettes_per_day as f32)
        .bp_meds(record.bp_medication.as_feature())
        .prevalent_stroke(record.prior_stroke.as_feature())
        .prevalent_hyp(record.hypertension.as_feature())
        .diabetes(if record.diabetes { 1.0 } else { 0.0 })
        .tot_chol(record.total_cholesterol)
        .sys_bp(record.systolic_bp)
        .dia_bp(record.diastolic_bp)
        .bmi(record.bmi)
        .heart_rate(record.heart_rate as f32)
        .glucose(record.glucose)
        .build())
}
