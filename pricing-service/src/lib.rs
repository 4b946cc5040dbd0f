//! Pricing for consultation orders
//!
//! Two pure stages over an immutable order snapshot:
//! - Price Resolver: one `ResolvedPrice` per ordered item, applying payer
//!   contract terms with documented fallbacks for missing reference data
//! - Financial Aggregator: folds resolved prices into category subtotals
//!   and a payer-split grand total
//!
//! Both stages are recomputed in full whenever the order set or payer
//! changes; nothing here caches or performs I/O.

pub mod aggregator;
pub mod models;
pub mod resolver;

pub use aggregator::*;
pub use models::*;
pub use resolver::*;
