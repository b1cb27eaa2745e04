//! `medicine` resource.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::Medicine;
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_medicines()?),
        (Operation::GetOne, Target::Item(id)) => found(service.medicine_by_id(id)?, "medicine", id),
        (Operation::Create, Target::Collection) => {
            let medicine: Medicine = parse_body(body)?;
            ok(&service.create_medicine(medicine)?)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: Medicine = parse_body(body)?;
            found(service.update_medicine(id, changes)?, "medicine", id)
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_medicine(id)?, "medicine", id)
        }
        _ => Err(unrouted(route)),
    }
}
