//! `medicalcertificate` resource.

use serde_json::Value;

use super::{deleted, found, ok, parse_body, unrouted};
use crate::models::MedicalCertificate;
use crate::rest::{ApiError, Response, Route, Target};
use crate::security::Operation;
use crate::service::MedicalService;

pub(super) fn handle(
    service: &MedicalService<'_>,
    route: &Route,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    match (route.operation, route.target) {
        (Operation::GetAll, Target::Collection) => ok(&service.all_medical_certificates()?),
        (Operation::GetOne, Target::Item(id)) => {
            found(service.medical_certificate_by_id(id)?, "medical certificate", id)
        }
        (Operation::Create, Target::Collection) => {
            let certificate: MedicalCertificate = parse_body(body)?;
            ok(&service.create_medical_certificate(certificate)?)
        }
        (Operation::Update, Target::Item(id)) => {
            let changes: MedicalCertificate = parse_body(body)?;
            found(service.update_medical_certificate(id, changes)?, "medical certificate", id)
        }
        (Operation::Delete, Target::Item(id)) => {
            deleted(service.delete_medical_certificate(id)?, "medical certificate", id)
        }
        _ => Err(unrouted(route)),
    }
}
