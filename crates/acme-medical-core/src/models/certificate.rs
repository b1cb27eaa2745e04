//! Medical certificate model.

use serde::{Deserialize, Serialize};

/// Certificate issued to a physician for a completed training.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCertificate {
    #[serde(default)]
    pub id: i64,
    /// Required at creation; cleared when the training's school is deleted
    #[serde(default)]
    pub training_id: Option<i64>,
    /// Owning physician
    pub owner_id: i64,
    #[serde(default, deserialize_with = "super::flag::deserialize")]
    pub signed: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl MedicalCertificate {
    pub fn new(training_id: i64, owner_id: i64, signed: bool) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            training_id: Some(training_id),
            owner_id,
            signed,
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }
}
