//! Patient model.

use serde::{Deserialize, Serialize};

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Year of birth
    pub year: i32,
    #[serde(default)]
    pub address: Option<String>,
    /// Height in cm
    pub height: i32,
    /// Weight in kg
    pub weight: i32,
    #[serde(default, deserialize_with = "super::flag::deserialize")]
    pub smoker: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl Patient {
    /// Create a transient patient with the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        year: i32,
        height: i32,
        weight: i32,
    ) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            year,
            address: None,
            height,
            weight,
            smoker: false,
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    /// Copy every business field from `other`, leaving id and audit fields alone.
    pub fn apply(&mut self, other: &Patient) {
        self.first_name = other.first_name.clone();
        self.last_name = other.last_name.clone();
        self.year = other.year;
        self.address = other.address.clone();
        self.height = other.height;
        self.weight = other.weight;
        self.smoker = other.smoker;
    }
}
