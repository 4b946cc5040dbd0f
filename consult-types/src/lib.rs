//! Shared domain model for the consultation resolution core
//!
//! Types used across the pricing, protocol, compliance, and consultation
//! services:
//! - Payer context and coverage classification
//! - Service catalog items, payer contracts, protocol bundles, prior results
//! - Clinical order lines, diagnoses, and vital signs
//! - Append-only clinician records (justifications, bundle deselections)
//!
//! Everything here is plain data. Behavior lives in the service crates.

pub mod catalog;
pub mod clinical;
pub mod payer;
pub mod records;

pub use catalog::*;
pub use clinical::*;
pub use payer::*;
pub use records::*;
