//! `patient` resource.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::Patient;
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_patients()?),
        (Operation::GetOne, Target::Item(id)) => found(service.patient_by_id(id)?, "patient", id),
        (Operation::Create, Target::Collection) => {
            let patient: Patient = parse_body(body)?;
            ok(&service.create_patient(patient)?)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: Patient = parse_body(body)?;
            found(service.update_patient(id, changes)?, "patient", id)
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_patient(id)?, "patient", id)
        }
        _ => Err(unrouted(route)),
    }
}
