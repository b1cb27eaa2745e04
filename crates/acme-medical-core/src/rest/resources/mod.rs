//! Resource handlers, one module per REST resource.

mod certificates;
mod medicines;
mod patients;
mod physicians;
mod prescriptions;
mod schools;
mod trainings;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, Response, Route};
use crate::security::Resource;
use crate::service::MedicalService;

pub(super) fn dispatch(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match route.resource {
        Resource::Physician => physicians::handle(service, route, body),
        Resource::Patient => patients::handle(service, route, body),
        Resource::Medicine => medicines::handle(service, route, body),
        Resource::MedicalSchool => schools::handle(service, route, body),
        Resource::MedicalTraining => trainings::handle(service, route, body),
        Resource::MedicalCertificate => certificates::handle(service, route, body),
        Resource::Prescription => prescriptions::handle(service, route, body),
    }
}

/// Deserialize a required JSON body.
fn parse_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::BadRequest("Request body is required".into()))?;
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(format!("Malformed body: {}", e)))
}

fn ok<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    Response::json(200, value)
}

/// 200 with the value, or 404 naming what was missing.
fn found<T: Serialize>(
    value: Option<T>,
    what: &str,
    id: impl std::fmt::Display,
) -> Result<Response, ApiError> {
    match value {
        Some(value) => ok(&value),
        None => Err(missing(what, id)),
    }
}

/// 204 when something was removed, 404 otherwise.
fn deleted<T>(
    removed: Option<T>,
    what: &str,
    id: impl std::fmt::Display,
) -> Result<Response, ApiError> {
    match removed {
        Some(_) => Ok(Response::no_content()),
        None => Err(missing(what, id)),
    }
}

fn missing(what: &str, id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Unable to find {} with id = {}", what, id))
}

/// A route the resource has no handler for.
fn unrouted(route: &Route) -> ApiError {
    ApiError::NotFound(format!(
        "No {} handler for {:?} on {}",
        route.method,
        route.target,
        route.resource.segment()
    ))
}
