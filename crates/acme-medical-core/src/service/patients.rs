//! Patient operations.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::NamedQuery;
use crate::models::{timestamp, Patient};
use crate::security::Caller;

impl MedicalService<'_> {
    pub fn all_patients(&self) -> ServiceResult<Vec<Patient>> {
        tracing::debug!("all_patients");
        Ok(self.db.get_all(NamedQuery::PatientFindAll)?)
    }

    pub fn patient_by_id(&self, id: i64) -> ServiceResult<Option<Patient>> {
        tracing::debug!(id, "patient_by_id");
        Ok(self.db.get_by_id(NamedQuery::PatientFindById, id)?)
    }

    pub fn create_patient(&self, mut patient: Patient) -> ServiceResult<Patient> {
        let now = timestamp();
        patient.created = now.clone();
        patient.updated = now;

        let id = self
            .db
            .unit_of_work(|db| -> ServiceResult<i64> { Ok(db.insert_patient(&patient)?) })?;
        tracing::info!(id, "patient created");
        self.patient_by_id(id)?
            .ok_or_else(|| ServiceError::Lookup(format!("patient {} vanished after insert", id)))
    }

    pub fn update_patient(&self, id: i64, changes: Patient) -> ServiceResult<Option<Patient>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) = db.get_by_id::<Patient>(NamedQuery::PatientFindById, id)? else {
                return Ok(false);
            };
            check_version("patient", changes.version, current.version)?;
            current.apply(&changes);
            Ok(db.update_patient(&current)?)
        })?;

        if !updated {
            tracing::warn!(id, "update of missing patient");
            return Ok(None);
        }
        tracing::info!(id, "patient updated");
        self.patient_by_id(id)
    }

    /// Remove a patient and its prescriptions. Returns the removed patient.
    pub fn delete_patient(&self, id: i64) -> ServiceResult<Option<Patient>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<Patient>> {
            let Some(patient) = db.get_by_id::<Patient>(NamedQuery::PatientFindById, id)? else {
                return Ok(None);
            };
            db.delete_patient(id)?;
            Ok(Some(patient))
        })?;

        match &removed {
            Some(_) => tracing::info!(id, "patient deleted"),
            None => tracing::warn!(id, "delete of missing patient"),
        }
        Ok(removed)
    }

    /// A USER owns patient `id` when its linked physician id equals `id`.
    pub fn owns_patient(&self, caller: &Caller, id: i64) -> bool {
        caller.physician_id == Some(id)
    }
}
