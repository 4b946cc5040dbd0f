use std::sync::Arc;

use catalog_service::{PayerContracts, ServiceCatalog};
use consult_types::{CoverageStatus, PayerContext};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{OrderLine, ResolvedPrice};

/// Resolves a price and coverage classification for each ordered item
/// against the service catalog and the payer's contract terms
pub struct PriceResolver {
    catalog: Arc<dyn ServiceCatalog>,
    contracts: Arc<dyn PayerContracts>,
}

impl PriceResolver {
    pub fn new(catalog: Arc<dyn ServiceCatalog>, contracts: Arc<dyn PayerContracts>) -> Self {
        Self { catalog, contracts }
    }

    /// Resolve every order line. Never drops a line: unknown catalog ids
    /// fall back to the captured order-entry price and are logged for
    /// operator follow-up, so the financial total stays complete.
    pub fn resolve_prices(&self, lines: &[OrderLine], payer: &PayerContext) -> Vec<ResolvedPrice> {
        lines
            .iter()
            .map(|line| self.resolve_line(line, payer))
            .collect()
    }

    fn resolve_line(&self, line: &OrderLine, payer: &PayerContext) -> ResolvedPrice {
        let standard_price = match self.catalog.lookup_item(&line.item_id) {
            Some(item) => {
                if !item.active {
                    warn!(
                        item_id = %line.item_id,
                        "ordered item is inactive in the service catalog"
                    );
                }
                item.cash_price
            }
            None => {
                let fallback = line.listed_price.unwrap_or(Decimal::ZERO);
                warn!(
                    item_id = %line.item_id,
                    item_name = %line.name,
                    fallback = %fallback,
                    "service catalog has no entry for ordered item, using captured price"
                );
                fallback
            }
        };

        match payer.hmo_provider() {
            Some(provider_id) => match self.contracts.lookup_contract(provider_id, &line.item_id) {
                Some(contract) => ResolvedPrice {
                    item_id: line.item_id.clone(),
                    item_name: line.name.clone(),
                    category: line.category,
                    standard_price,
                    payer_price: contract.negotiated_price,
                    coverage: contract.coverage,
                    copay: contract.copay,
                },
                // No contract row: cash pricing, outside the HMO's cover
                None => ResolvedPrice {
                    item_id: line.item_id.clone(),
                    item_name: line.name.clone(),
                    category: line.category,
                    standard_price,
                    payer_price: standard_price,
                    coverage: CoverageStatus::NotCovered,
                    copay: None,
                },
            },
            // Cash and corporate payers pay the list price; the coverage
            // classification is display-only for them
            None => ResolvedPrice {
                item_id: line.item_id.clone(),
                item_name: line.name.clone(),
                category: line.category,
                standard_price,
                payer_price: standard_price,
                coverage: CoverageStatus::Covered,
                copay: None,
            },
        }
    }
}
