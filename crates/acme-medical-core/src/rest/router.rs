//! Path and method routing.

use super::{ApiError, Method};
use crate::models::PrescriptionKey;
use crate::security::{Operation, Resource};

const API_PREFIX: &str = "api/v1/";

/// What a route addresses inside its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Collection,
    Item(i64),
    /// `prescription/{physicianId}/{patientId}`
    Prescription(PrescriptionKey),
    /// `physician/{physicianId}/patient/{patientId}/medicine`
    PhysicianPatientMedicine { physician_id: i64, patient_id: i64 },
    /// `medicalschool/{id}/medicaltraining`
    SchoolTrainings(i64),
}

/// A matched route: the resource, the policy operation and the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub resource: Resource,
    pub operation: Operation,
    pub target: Target,
}

impl Route {
    /// Match `method` and `path`. A leading `/` and an `api/v1/` prefix are
    /// accepted; trailing slashes are ignored.
    pub fn parse(method: Method, path: &str) -> Result<Self, ApiError> {
        let trimmed = path.trim_start_matches('/');
        let trimmed = trimmed.strip_prefix(API_PREFIX).unwrap_or(trimmed);
        let segments: Vec<&str> = trimmed
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let not_found = || ApiError::NotFound(format!("No route for {}", path));
        let (first, rest) = segments.split_first().ok_or_else(not_found)?;
        let resource = Resource::from_segment(first).ok_or_else(not_found)?;

        let (operation, target) = match (resource, rest) {
            (_, []) => match method {
                Method::Get => (Operation::GetAll, Target::Collection),
                Method::Post => (Operation::Create, Target::Collection),
                _ => return Err(ApiError::MethodNotAllowed),
            },
            (Resource::Prescription, [physician_id, patient_id]) => {
                let key = PrescriptionKey::new(
                    parse_id(physician_id).ok_or_else(not_found)?,
                    parse_id(patient_id).ok_or_else(not_found)?,
                );
                (item_operation(method)?, Target::Prescription(key))
            }
            (Resource::Prescription, _) => return Err(not_found()),
            (_, [id]) => {
                let id = parse_id(id).ok_or_else(not_found)?;
                (item_operation(method)?, Target::Item(id))
            }
            (Resource::Physician, [physician_id, "patient", patient_id, "medicine"]) => {
                if method != Method::Put {
                    return Err(ApiError::MethodNotAllowed);
                }
                let target = Target::PhysicianPatientMedicine {
                    physician_id: parse_id(physician_id).ok_or_else(not_found)?,
                    patient_id: parse_id(patient_id).ok_or_else(not_found)?,
                };
                (Operation::Update, target)
            }
            (Resource::MedicalSchool, [id, "medicaltraining"]) => {
                if method != Method::Post {
                    return Err(ApiError::MethodNotAllowed);
                }
                let id = parse_id(id).ok_or_else(not_found)?;
                (Operation::Create, Target::SchoolTrainings(id))
            }
            _ => return Err(not_found()),
        };

        Ok(Route {
            method,
            resource,
            operation,
            target,
        })
    }
}

fn item_operation(method: Method) -> Result<Operation, ApiError> {
    match method {
        Method::Get => Ok(Operation::GetOne),
        Method::Put => Ok(Operation::Update),
        Method::Delete => Ok(Operation::Delete),
        Method::Post => Err(ApiError::MethodNotAllowed),
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse().ok()
}
