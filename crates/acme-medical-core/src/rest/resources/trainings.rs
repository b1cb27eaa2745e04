//! `medicaltraining` resource.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::MedicalTraining;
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_medical_trainings()?),
        (Operation::GetOne, Target::Item(id)) => {
            found(service.medical_training_by_id(id)?, "medical training", id)
        }
        (Operation::Create, Target::Collection) => {
            let training: MedicalTraining = parse_body(body)?;
            ok(&service.create_medical_training(training)?)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: MedicalTraining = parse_body(body)?;
            found(service.update_medical_training(id, changes)?, "medical training", id)
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_medical_training(id)?, "medical training", id)
        }
        _ => Err(unrouted(route)),
    }
}
