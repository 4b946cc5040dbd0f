//! Protocol bundle matching for consultations
//!
//! - Suggests diagnosis-linked order sets not yet fully covered by the
//!   current orders, respecting per-session dismissals
//! - Applies a bundle (fully or partially) into the order lists without
//!   ever duplicating an already-present item
//! - Emits one append-only deselection audit record per partial acceptance

pub mod application;
pub mod matcher;
pub mod models;

pub use application::*;
pub use matcher::*;
pub use models::*;
