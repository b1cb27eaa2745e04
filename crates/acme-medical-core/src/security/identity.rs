//! Identity store: verify credentials against stored accounts.

use thiserror::Error;

use super::{verify_password, Caller, Credentials, PasswordError};
use crate::db::{Database, DbError};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Resolve credentials to a caller. `None` for an unknown username or a
/// wrong password.
pub fn authenticate(
    db: &Database,
    credentials: &Credentials,
) -> Result<Option<Caller>, IdentityError> {
    let Some(user) = db.security_user_by_username(&credentials.username)? else {
        tracing::debug!(username = %credentials.username, "unknown username");
        return Ok(None);
    };

    if !verify_password(&credentials.password, &user.password_hash)? {
        tracing::debug!(username = %credentials.username, "password mismatch");
        return Ok(None);
    }

    Ok(Some(Caller {
        username: user.username,
        roles: user.roles,
        physician_id: user.physician_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordHashConfig;
    use crate::models::{Physician, Role};
    use crate::security::hash_password;

    fn cheap() -> PasswordHashConfig {
        PasswordHashConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_authenticate() {
        let db = Database::open_in_memory().unwrap();
        let physician_id = db.insert_physician(&Physician::new("Ann", "Lee")).unwrap();
        let phc = hash_password("password", &cheap()).unwrap();
        db.insert_security_user("user_Ann.Lee", &phc, Some(physician_id), &[Role::User])
            .unwrap();

        let caller = authenticate(&db, &Credentials::new("user_Ann.Lee", "password"))
            .unwrap()
            .unwrap();
        assert_eq!(caller.physician_id, Some(physician_id));
        assert!(caller.has_role(Role::User));
        assert!(!caller.is_admin());

        assert!(authenticate(&db, &Credentials::new("user_Ann.Lee", "wrong"))
            .unwrap()
            .is_none());
        assert!(authenticate(&db, &Credentials::new("nobody", "password"))
            .unwrap()
            .is_none());
    }
}
