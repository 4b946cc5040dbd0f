use consult_types::ProtocolBundle;

use crate::error::{CatalogError, CatalogResult};

/// Read-only access to the protocol bundle catalog
pub trait BundleCatalog: Send + Sync {
    /// Bundles in catalog order
    fn list_bundles(&self) -> Vec<ProtocolBundle>;

    fn find_bundle(&self, bundle_id: &str) -> Option<ProtocolBundle> {
        self.list_bundles().into_iter().find(|b| b.id == bundle_id)
    }
}

/// In-memory bundle catalog for testing and development
#[derive(Default)]
pub struct InMemoryBundleCatalog {
    bundles: Vec<ProtocolBundle>,
}

impl InMemoryBundleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_bundle(&mut self, bundle: ProtocolBundle) -> CatalogResult<()> {
        if bundle.diagnosis_codes.is_empty() {
            return Err(CatalogError::Validation(format!(
                "bundle {} has no associated diagnosis codes",
                bundle.id
            )));
        }
        if bundle.lab_tests.is_empty() && bundle.medications.is_empty() {
            return Err(CatalogError::Validation(format!(
                "bundle {} has no constituent tests or medications",
                bundle.id
            )));
        }
        if self.bundles.iter().any(|b| b.id == bundle.id) {
            return Err(CatalogError::Duplicate(bundle.id));
        }
        self.bundles.push(bundle);
        Ok(())
    }
}

impl BundleCatalog for InMemoryBundleCatalog {
    fn list_bundles(&self) -> Vec<ProtocolBundle> {
        self.bundles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_types::BundleLabTest;

    #[test]
    fn empty_bundles_are_rejected() {
        let mut catalog = InMemoryBundleCatalog::new();
        let bundle = ProtocolBundle {
            id: "bdl-htn".to_string(),
            name: "Hypertension Workup".to_string(),
            diagnosis_codes: vec!["I10".to_string()],
            lab_tests: vec![],
            medications: vec![],
        };
        assert!(matches!(
            catalog.register_bundle(bundle),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn find_bundle_by_id() {
        let mut catalog = InMemoryBundleCatalog::new();
        catalog
            .register_bundle(ProtocolBundle {
                id: "bdl-htn".to_string(),
                name: "Hypertension Workup".to_string(),
                diagnosis_codes: vec!["I10".to_string()],
                lab_tests: vec![BundleLabTest {
                    code: "LAB-LIPID".to_string(),
                    name: "Lipid Panel".to_string(),
                }],
                medications: vec![],
            })
            .unwrap();

        assert!(catalog.find_bundle("bdl-htn").is_some());
        assert!(catalog.find_bundle("bdl-dm").is_none());
    }
}
