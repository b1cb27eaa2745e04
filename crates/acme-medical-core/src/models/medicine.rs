//! Medicine model.

use serde::{Deserialize, Serialize};

/// A medicine. Shared by prescriptions, never owned by one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(default)]
    pub id: i64,
    pub drug_name: String,
    pub manufacturer_name: String,
    pub dosage_information: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl Medicine {
    pub fn new(
        drug_name: impl Into<String>,
        manufacturer_name: impl Into<String>,
        dosage_information: impl Into<String>,
    ) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            drug_name: drug_name.into(),
            manufacturer_name: manufacturer_name.into(),
            dosage_information: dosage_information.into(),
            generic_name: None,
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    /// Overwrite drug, manufacturer and dosage from `other`.
    ///
    /// The generic name is only replaced when `other` carries one.
    pub fn set_medicine(&mut self, other: &Medicine) {
        self.drug_name = other.drug_name.clone();
        self.manufacturer_name = other.manufacturer_name.clone();
        self.dosage_information = other.dosage_information.clone();
        if other.generic_name.is_some() {
            self.generic_name = other.generic_name.clone();
        }
    }
}
