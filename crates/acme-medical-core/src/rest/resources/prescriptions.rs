//! `prescription` resource, addressed by `{physicianId}/{patientId}`.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::Prescription;
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_prescriptions()?),
        (Operation::GetOne, Target::Prescription(key)) => {
            found(service.prescription_by_key(key)?, "prescription", key)
        }
        (Operation::Create, Target::Collection) => {
            let prescription: Prescription = parse_body(body)?;
            Response::json(201, &service.create_prescription(prescription)?)
        }
        (Operation::Update, Target::Prescription(key)) => {
            let mut changes: Prescription = parse_body(body)?;
            changes.physician_id = key.physician_id;
            changes.patient_id = key.patient_id;
            found(service.update_prescription(key, changes)?, "prescription", key)
        }
        (Operation::Delete, Target::Prescription(key)) => {
            deleted(service.delete_prescription(key)?, "prescription", key)
        }
        _ => Err(unrouted(route)),
    }
}
