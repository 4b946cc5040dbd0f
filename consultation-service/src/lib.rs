//! Consultation editing session and finalization gate
//!
//! Holds the `ConsultationFormData` aggregate for one in-progress
//! encounter and composes the pricing, protocol, and compliance services
//! behind a single surface:
//! - resolve prices and financial summary for the current orders
//! - suggest and apply protocol bundles
//! - detect justification triggers and evaluate payer compliance
//! - gate finalization: unresolved justification triggers hard-block,
//!   compliance failures warn
//!
//! Every derived value is a pure function of the current form snapshot
//! and is recomputed in full on each call.

pub mod error;
pub mod form;
pub mod gate;
pub mod service;

pub use error::*;
pub use form::*;
pub use gate::*;
pub use service::*;
