//! ACME Medical Core Library
//!
//! Records backend for physicians, patients, medical schools with their
//! trainings and certificates, medicines and prescriptions, behind a
//! role-based access policy.
//!
//! # Architecture
//!
//! ```text
//!        host (HTTP server / FFI / CLI)
//!                    │  method + path + credentials + JSON body
//!                    ▼
//!   ┌───────────────────────────────────┐
//!   │ rest::handle                      │
//!   │   route → authenticate → policy   │
//!   └────────────────┬──────────────────┘
//!                    ▼
//!   ┌───────────────────────────────────┐
//!   │ MedicalService (unit of work)     │
//!   │   integrity: school / physician / │
//!   │   medicine / prescription rules   │
//!   └────────────────┬──────────────────┘
//!                    ▼
//!        SQLite, foreign keys enforced
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite schema, named queries and per-entity persistence
//! - [`models`]: Domain types (Physician, Patient, MedicalSchool, etc.)
//! - [`service`]: Service facade and integrity maintenance
//! - [`security`]: Password hashing, identity store, access policy
//! - [`rest`]: Transport-agnostic request boundary
//! - [`config`], [`logging`]: Runtime configuration and tracing setup

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod rest;
pub mod security;
pub mod service;

// Re-export commonly used types
pub use config::{Config, ConfigError, PasswordHashConfig};
pub use db::{Database, DbError};
pub use models::{
    DurationAndStatus, MedicalCertificate, MedicalSchool, MedicalTraining, Medicine, Patient,
    Physician, Prescription, PrescriptionKey, Role, SchoolKind,
};
pub use rest::{handle, ApiError, Method, Request, Response};
pub use service::{MedicalService, ServiceError, ServiceResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use security::Credentials;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AcmeMedicalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DbError> for AcmeMedicalError {
    fn from(e: DbError) -> Self {
        AcmeMedicalError::DatabaseError(e.to_string())
    }
}

impl From<ServiceError> for AcmeMedicalError {
    fn from(e: ServiceError) -> Self {
        AcmeMedicalError::DatabaseError(e.to_string())
    }
}

impl From<ConfigError> for AcmeMedicalError {
    fn from(e: ConfigError) -> Self {
        AcmeMedicalError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AcmeMedicalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AcmeMedicalError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path. Configuration comes from
/// the `ACME_MEDICAL_*` environment.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<AcmeMedicalCore>, AcmeMedicalError> {
    let config = Config::from_env()?;
    let db = Database::open(&path)?;
    Ok(Arc::new(AcmeMedicalCore::new(db, config)?))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<AcmeMedicalCore>, AcmeMedicalError> {
    let config = Config::from_env()?;
    let db = Database::open_in_memory()?;
    Ok(Arc::new(AcmeMedicalCore::new(db, config)?))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI. Requests are serialized on the lock.
#[derive(uniffi::Object)]
pub struct AcmeMedicalCore {
    db: Arc<Mutex<Database>>,
    config: Config,
}

impl AcmeMedicalCore {
    /// Wrap an open database, creating the configured admin account if missing.
    pub fn new(db: Database, config: Config) -> Result<Self, AcmeMedicalError> {
        MedicalService::new(&db, &config)
            .ensure_admin_account(&config.admin_username, &config.admin_password)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        })
    }

    /// Handle a request built on the Rust side.
    pub fn handle_request(&self, request: Request) -> Result<Response, AcmeMedicalError> {
        let db = self.db.lock()?;
        Ok(rest::handle(&db, &self.config, request))
    }
}

#[uniffi::export]
impl AcmeMedicalCore {
    /// Handle one request. Failures the boundary knows how to report
    /// (including a malformed JSON body) come back as an error response.
    pub fn handle(&self, request: FfiRequest) -> Result<FfiResponse, AcmeMedicalError> {
        let method: Method = request
            .method
            .parse()
            .map_err(AcmeMedicalError::InvalidInput)?;

        let body = match request.body.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => match serde_json::from_str(text) {
                Ok(value) => Some(value),
                Err(e) => {
                    let response = ApiError::BadRequest(format!("Malformed body: {}", e));
                    return Ok(response.into_response().into());
                }
            },
            _ => None,
        };

        let credentials = match (request.username, request.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        let response = self.handle_request(Request {
            method,
            path: request.path,
            credentials,
            body,
        })?;
        Ok(response.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRequest {
    /// GET, POST, PUT or DELETE
    pub method: String,
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// JSON text
    pub body: Option<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiResponse {
    pub status: u16,
    /// JSON text; absent for 204
    pub body: Option<String>,
}

impl From<Response> for FfiResponse {
    fn from(response: Response) -> Self {
        FfiResponse {
            status: response.status,
            body: response.body.map(|body| body.to_string()),
        }
    }
}
