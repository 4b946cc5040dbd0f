//! Clinical-governance and payer-compliance checks for consultations
//!
//! - Justification Trigger Detector: flags ordered items that need a
//!   written clinical rationale (conflicts with prior results, high-value
//!   items) and joins them against existing justification entries
//! - HMO Compliance Evaluator: runs payer-authored domain rules, stored
//!   as data, against the in-progress consultation
//! - Structural checklist: provider-independent completeness warnings
//!
//! Triggers and alerts are derived values, recomputed from the current
//! snapshot on every evaluation; only justification entries persist.

pub mod checklist;
pub mod hmo;
pub mod justification;

pub use checklist::*;
pub use hmo::*;
pub use justification::*;
