//! Physician model.

use serde::{Deserialize, Serialize};

/// A physician. Owns medical certificates and prescriptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Physician {
    /// Store-assigned id; 0 until persisted
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    /// Incremented on every update; 0 in a request body means "don't check"
    #[serde(default)]
    pub version: i64,
}

impl Physician {
    /// Create a transient physician.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_physician() {
        let physician = Physician::new("John", "Doe");
        assert_eq!(physician.full_name(), "John Doe");
        assert!(!physician.is_persisted());
        assert_eq!(physician.version, 1);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let physician: Physician =
            serde_json::from_str(r#"{"firstName": "John123", "lastName": "Doe123"}"#).unwrap();
        assert_eq!(physician.first_name, "John123");
        assert_eq!(physician.id, 0);

        let json = serde_json::to_value(&physician).unwrap();
        assert_eq!(json["lastName"], "Doe123");
    }
}
