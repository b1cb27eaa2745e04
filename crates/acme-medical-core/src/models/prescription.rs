//! Prescription model, keyed by physician + patient.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key of a prescription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionKey {
    pub physician_id: i64,
    pub patient_id: i64,
}

impl PrescriptionKey {
    pub fn new(physician_id: i64, patient_id: i64) -> Self {
        Self {
            physician_id,
            patient_id,
        }
    }
}

impl fmt::Display for PrescriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "physician {} / patient {}", self.physician_id, self.patient_id)
    }
}

/// A prescription written by a physician for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Taken from the path on update
    #[serde(default)]
    pub physician_id: i64,
    #[serde(default)]
    pub patient_id: i64,
    /// Shared medicine reference (optional)
    #[serde(default)]
    pub medicine_id: Option<i64>,
    #[serde(default)]
    pub number_of_refills: i32,
    #[serde(default)]
    pub prescription_information: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl Prescription {
    pub fn new(key: PrescriptionKey) -> Self {
        let now = super::timestamp();
        Self {
            physician_id: key.physician_id,
            patient_id: key.patient_id,
            medicine_id: None,
            number_of_refills: 0,
            prescription_information: String::new(),
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    pub fn key(&self) -> PrescriptionKey {
        PrescriptionKey::new(self.physician_id, self.patient_id)
    }
}
