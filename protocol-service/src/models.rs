use consult_types::{BundleLabTest, BundleMedication, ProtocolBundle};
use serde::{Deserialize, Serialize};

/// A candidate bundle with the missing-only framing: only constituents
/// not already present in the current orders are listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSuggestion {
    pub bundle: ProtocolBundle,
    pub missing_tests: Vec<BundleLabTest>,
    pub missing_medications: Vec<BundleMedication>,
}

/// What the clinician chose to keep when accepting a bundle: test codes
/// and drug names. Anything not listed is an exclusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleSelection {
    pub test_codes: Vec<String>,
    pub drug_names: Vec<String>,
}

impl BundleSelection {
    /// Selection covering every constituent of the bundle
    pub fn full(bundle: &ProtocolBundle) -> Self {
        Self {
            test_codes: bundle.lab_tests.iter().map(|t| t.code.clone()).collect(),
            drug_names: bundle.medications.iter().map(|m| m.name.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.test_codes.is_empty() && self.drug_names.is_empty()
    }

    pub fn includes_test(&self, code: &str) -> bool {
        self.test_codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    pub fn includes_drug(&self, name: &str) -> bool {
        self.drug_names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}
