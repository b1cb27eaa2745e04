//! Authentication and authorization.
//!
//! - [`password`]: Argon2id PHC hashing
//! - [`identity`]: resolves credentials to a [`Caller`]
//! - [`policy`]: static (resource × operation) access table

pub mod identity;
pub mod password;
pub mod policy;

pub use identity::{authenticate, IdentityError};
pub use password::{hash_password, verify_password, PasswordError};
pub use policy::{evaluate, requirement, Access, Operation, Rejection, Requirement, Resource};

use std::fmt;

use crate::models::Role;

/// Username/password pair presented with a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub roles: Vec<Role>,
    /// Physician linked to a USER account
    pub physician_id: Option<i64>,
}

impl Caller {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}
