//! Reference-data collaborators for the consultation core
//!
//! Read-only lookup seams, each a plain trait with an in-memory
//! implementation:
//! - Service catalog: canonical items with cash prices
//! - Payer contracts: negotiated prices and coverage tiers per (payer, item)
//! - Protocol bundle catalog: diagnosis-linked standard order sets
//! - Prior results: completed results and dispensed-medication records
//!
//! The core treats all of these as already-materialized inputs; nothing
//! here performs I/O.

pub mod bundles;
pub mod catalog;
pub mod contracts;
pub mod error;
pub mod results;

pub use bundles::*;
pub use catalog::*;
pub use contracts::*;
pub use error::*;
pub use results::*;
