//! Domain models for the medical records system.

mod certificate;
mod flag;
mod medicine;
mod patient;
mod physician;
mod prescription;
mod school;
mod security;
mod training;

pub use certificate::*;
pub use medicine::*;
pub use patient::*;
pub use physician::*;
pub use prescription::*;
pub use school::*;
pub use security::*;
pub use training::*;

/// Current UTC time in the RFC 3339 form stored in `created`/`updated` columns.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
