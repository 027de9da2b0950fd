//! Clinical Module - Raw Patient Input
//!
//! Strongly typed clinical record plus domain validation. Everything the
//! intake layer sends must pass through here before any encoding happens.

pub mod record;
pub mod validate;

// Re-export common types
pub use record::{RawClinicalRecord, Sex, YesNo};
pub use validate::{ValidationError, FieldDomain};
