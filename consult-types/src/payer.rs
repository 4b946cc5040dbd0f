use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who is financially responsible for an encounter's orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayerContext {
    Cash,
    Corporate { account_id: String },
    Hmo { provider_id: String },
}

impl PayerContext {
    pub fn is_hmo(&self) -> bool {
        matches!(self, PayerContext::Hmo { .. })
    }

    /// HMO provider id, if this payer is an HMO
    pub fn hmo_provider(&self) -> Option<&str> {
        match self {
            PayerContext::Hmo { provider_id } => Some(provider_id),
            _ => None,
        }
    }
}

/// How much of an item's price an HMO contract covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Covered,
    Partial,
    NotCovered,
}

/// Patient-share terms for partially covered items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CopayTerms {
    /// Patient pays this fraction of the payer price (0 to 1)
    Fraction { rate: Decimal },
    /// Patient pays a fixed amount, capped at the payer price
    Fixed { amount: Decimal },
}
