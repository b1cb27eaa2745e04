//! `medicalschool` resource, including `medicalschool/{id}/medicaltraining`.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::{MedicalSchool, MedicalTraining};
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_medical_schools()?),
        (Operation::GetOne, Target::Item(id)) => {
            found(service.medical_school_by_id(id)?, "medical school", id)
        }
        (Operation::Create, Target::Collection) => {
            let school: MedicalSchool = parse_body(body)?;
            ok(&service.create_medical_school(school)?)
        }
        (Operation::Create, Target::SchoolTrainings(id)) => {
            let training: MedicalTraining = parse_body(body)?;
            found(service.add_training_to_school(id, training)?, "medical school", id)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: MedicalSchool = parse_body(body)?;
            found(service.update_medical_school(id, changes)?, "medical school", id)
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_medical_school(id)?, "medical school", id)
        }
        _ => Err(unrouted(route)),
    }
}
