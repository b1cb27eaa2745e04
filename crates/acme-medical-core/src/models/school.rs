//! Medical school model.
//!
//! Public and private schools share one record shape and one table; the
//! variant is a discriminant (`public` column: 1 = public, 0 = private).

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::MedicalTraining;

/// School variant. Serialized as the JSON `type` property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SchoolKind {
    #[serde(rename = "PublicSchool")]
    Public,
    #[serde(rename = "PrivateSchool")]
    Private,
}

impl SchoolKind {
    /// Integer discriminator stored in the `public` column.
    pub fn discriminator(self) -> i64 {
        match self {
            SchoolKind::Public => 1,
            SchoolKind::Private => 0,
        }
    }

    pub fn from_discriminator(value: i64) -> Option<Self> {
        match value {
            1 => Some(SchoolKind::Public),
            0 => Some(SchoolKind::Private),
            _ => None,
        }
    }
}

/// A medical school. Owns its trainings.
///
/// Equality and hashing use the business key (id + unique name) only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalSchool {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SchoolKind,
    /// Populated only by the eager by-id lookup
    #[serde(default)]
    pub medical_trainings: Vec<MedicalTraining>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl MedicalSchool {
    pub fn new(name: impl Into<String>, kind: SchoolKind) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            name: name.into(),
            kind,
            medical_trainings: Vec::new(),
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, SchoolKind::Public)
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, SchoolKind::Private)
    }

    pub fn is_public(&self) -> bool {
        self.kind == SchoolKind::Public
    }
}

impl PartialEq for MedicalSchool {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for MedicalSchool {}

impl Hash for MedicalSchool {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}
