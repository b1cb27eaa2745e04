//! `physician` resource.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::{Medicine, Physician};
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_physicians()?),
        (Operation::GetOne, Target::Item(id)) => {
            found(service.physician_by_id(id)?, "physician", id)
        }
        (Operation::Create, Target::Collection) => {
            let physician: Physician = parse_body(body)?;
            ok(&service.create_physician(physician)?)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: Physician = parse_body(body)?;
            found(service.update_physician(id, changes)?, "physician", id)
        }
        (
            Operation::Update,
            Target::PhysicianPatientMedicine {
                physician_id,
                patient_id,
            },
        ) => {
            let medicine: Medicine = parse_body(body)?;
            found(
                service.set_medicine_for_physician_patient(physician_id, patient_id, medicine)?,
                "physician",
                physician_id,
            )
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_physician(id)?, "physician", id)
        }
        _ => Err(unrouted(route)),
    }
}
