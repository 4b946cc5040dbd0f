use std::collections::HashMap;

use consult_types::ServiceCatalogItem;
use rust_decimal::Decimal;

use crate::error::{CatalogError, CatalogResult};

/// Read-only access to canonical service items
pub trait ServiceCatalog: Send + Sync {
    /// Look up an item by its service code. Returns inactive items too;
    /// callers decide how to treat the `active` flag.
    fn lookup_item(&self, item_id: &str) -> Option<ServiceCatalogItem>;
}

/// In-memory service catalog for testing and development
#[derive(Default)]
pub struct InMemoryServiceCatalog {
    items: HashMap<String, ServiceCatalogItem>,
}

impl InMemoryServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_item(&mut self, item: ServiceCatalogItem) -> CatalogResult<()> {
        if item.id.trim().is_empty() {
            return Err(CatalogError::Validation(
                "catalog item id cannot be empty".to_string(),
            ));
        }
        if item.cash_price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "catalog item {} has a negative cash price",
                item.id
            )));
        }
        if self.items.contains_key(&item.id) {
            return Err(CatalogError::Duplicate(item.id));
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }
}

impl ServiceCatalog for InMemoryServiceCatalog {
    fn lookup_item(&self, item_id: &str) -> Option<ServiceCatalogItem> {
        self.items.get(item_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_types::ServiceCategory;
    use rust_decimal_macros::dec;

    fn lipid_panel() -> ServiceCatalogItem {
        ServiceCatalogItem {
            id: "LAB-LIPID".to_string(),
            name: "Lipid Panel".to_string(),
            category: ServiceCategory::Lab,
            cash_price: dec!(5000),
            active: true,
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut catalog = InMemoryServiceCatalog::new();
        catalog.register_item(lipid_panel()).unwrap();

        let found = catalog.lookup_item("LAB-LIPID").unwrap();
        assert_eq!(found.cash_price, dec!(5000));
        assert!(catalog.lookup_item("LAB-MISSING").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut catalog = InMemoryServiceCatalog::new();
        catalog.register_item(lipid_panel()).unwrap();
        let err = catalog.register_item(lipid_panel()).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(id) if id == "LAB-LIPID"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut catalog = InMemoryServiceCatalog::new();
        let mut item = lipid_panel();
        item.cash_price = dec!(-1);
        assert!(matches!(
            catalog.register_item(item),
            Err(CatalogError::Validation(_))
        ));
    }
}
