//! Security users and roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Security role. Stored by name in `security_role`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    #[serde(rename = "ADMIN_ROLE")]
    Admin,
    #[serde(rename = "USER_ROLE")]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN_ROLE",
            Role::User => "USER_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN_ROLE" => Ok(Role::Admin),
            "USER_ROLE" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A login account. USER accounts are linked to exactly one physician.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityUser {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub physician_id: Option<i64>,
    pub roles: Vec<Role>,
}

impl SecurityUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Username for the account created alongside a physician:
/// `{prefix}_{firstName}.{lastName}`.
pub fn derive_username(prefix: &str, first_name: &str, last_name: &str) -> String {
    format!("{}_{}.{}", prefix, first_name, last_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Admin.to_string(), "ADMIN_ROLE");
        assert_eq!("USER_ROLE".parse::<Role>(), Ok(Role::User));
        assert!("ROOT".parse::<Role>().is_err());
    }

    #[test]
    fn test_derive_username() {
        assert_eq!(derive_username("user", "John", "Doe"), "user_John.Doe");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = SecurityUser {
            id: 1,
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            physician_id: None,
            roles: vec![Role::Admin],
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("ADMIN_ROLE"));
    }

    proptest! {
        #[test]
        fn prop_username_is_deterministic(
            first in "[A-Za-z0-9]{1,20}",
            last in "[A-Za-z0-9]{1,20}",
        ) {
            let a = derive_username("user", &first, &last);
            let b = derive_username("user", &first, &last);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.starts_with("user_"));
            let expected_suffix = format!("{}.{}", first, last);
            prop_assert!(a.ends_with(&expected_suffix));
        }
    }
}
