//! Service facade over the store.
//!
//! Every mutation runs in one [`Database::unit_of_work`]; reads go straight
//! to the connection. Update operations re-fetch the stored record first and
//! answer `None` when it is gone.

mod certificates;
mod integrity;
mod medicines;
mod patients;
mod physicians;
mod prescriptions;
mod schools;
mod trainings;

use thiserror::Error;

use crate::config::Config;
use crate::db::{Database, DbError};
use crate::models::Role;
use crate::security::{hash_password, PasswordError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Version conflict: {0}")]
    Conflict(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coordinating entry point for every entity type.
pub struct MedicalService<'a> {
    db: &'a Database,
    config: &'a Config,
}

impl<'a> MedicalService<'a> {
    pub fn new(db: &'a Database, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Create the admin account unless one with that username exists.
    /// Returns whether an account was created.
    pub fn ensure_admin_account(&self, username: &str, password: &str) -> ServiceResult<bool> {
        self.db.unit_of_work(|db| -> ServiceResult<bool> {
            if db.security_user_by_username(username)?.is_some() {
                return Ok(false);
            }
            let phc = hash_password(password, &self.config.password_hash)?;
            db.insert_security_user(username, &phc, None, &[Role::Admin])?;
            tracing::info!(%username, "admin account created");
            Ok(true)
        })
    }
}

/// Reject an update whose submitted version does not match the stored one.
/// A submitted version of 0 means the client did not send one.
fn check_version(what: &str, submitted: i64, stored: i64) -> ServiceResult<()> {
    if submitted != 0 && submitted != stored {
        tracing::warn!(what, submitted, stored, "stale update rejected");
        return Err(ServiceError::Conflict(format!(
            "{} is at version {}, update was based on {}",
            what, stored, submitted
        )));
    }
    Ok(())
}
