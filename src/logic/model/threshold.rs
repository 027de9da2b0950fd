//! Decision Threshold Policy
//!
//! Converts a calibrated probability into a categorical risk label.
//! The cutoff is a fixed policy constant, never learned per request.

use serde::{Deserialize, Serialize};

use crate::constants::RISK_THRESHOLD;

/// Binarized 10-year CHD risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    LowRisk,
    HighRisk,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::LowRisk => write!(f, "Low Risk"),
            RiskLabel::HighRisk => write!(f, "High Risk"),
        }
    }
}

/// Threshold Policy
///
/// The default cutoff sits below 0.5 on purpose: screening favors
/// sensitivity over raw accuracy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// Probability cutoff (0.0 - 1.0), exclusive on the high side
    pub cutoff: f32,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            cutoff: RISK_THRESHOLD,
        }
    }
}

impl ThresholdPolicy {
    pub fn new(cutoff: f32) -> Self {
        Self { cutoff }
    }

    /// High Risk iff probability is STRICTLY greater than the cutoff.
    /// A probability exactly at the cutoff classifies Low Risk.
    pub fn classify(&self, probability: f32) -> RiskLabel {
        if probability > self.cutoff {
            RiskLabel::HighRisk
        } else {
            RiskLabel::LowRisk
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoff() {
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.cutoff, 0.30);
    }

    #[test]
    fn test_classify_above_cutoff() {
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.classify(0.31), RiskLabel::HighRisk);
        assert_eq!(policy.classify(0.99), RiskLabel::HighRisk);
    }

    #[test]
    fn test_classify_below_cutoff() {
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.classify(0.0), RiskLabel::LowRisk);
        assert_eq!(policy.classify(0.29), RiskLabel::LowRisk);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // Exactly at the cutoff is NOT high risk
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.classify(0.30), RiskLabel::LowRisk);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(RiskLabel::HighRisk.to_string(), "High Risk");
        assert_eq!(RiskLabel::LowRisk.to_string(), "Low Risk");
    }
}
