use std::collections::HashMap;

use consult_types::{CopayTerms, PayerContract};
use rust_decimal::Decimal;

use crate::error::{CatalogError, CatalogResult};

/// Read-only access to payer-specific contract terms. One contract per
/// (payer, item) pair; absence means cash pricing applies.
pub trait PayerContracts: Send + Sync {
    fn lookup_contract(&self, payer_id: &str, item_id: &str) -> Option<PayerContract>;
}

/// In-memory contract table for testing and development
#[derive(Default)]
pub struct InMemoryPayerContracts {
    contracts: HashMap<(String, String), PayerContract>,
}

impl InMemoryPayerContracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_contract(&mut self, contract: PayerContract) -> CatalogResult<()> {
        if contract.negotiated_price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "contract for ({}, {}) has a negative negotiated price",
                contract.payer_id, contract.item_id
            )));
        }
        if let Some(CopayTerms::Fraction { rate }) = contract.copay {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(CatalogError::Validation(format!(
                    "contract for ({}, {}) has a copay fraction outside 0..=1",
                    contract.payer_id, contract.item_id
                )));
            }
        }
        let key = (contract.payer_id.clone(), contract.item_id.clone());
        if self.contracts.contains_key(&key) {
            return Err(CatalogError::Duplicate(format!(
                "({}, {})",
                contract.payer_id, contract.item_id
            )));
        }
        self.contracts.insert(key, contract);
        Ok(())
    }
}

impl PayerContracts for InMemoryPayerContracts {
    fn lookup_contract(&self, payer_id: &str, item_id: &str) -> Option<PayerContract> {
        self.contracts
            .get(&(payer_id.to_string(), item_id.to_string()))
            .cloned()
    }
}
