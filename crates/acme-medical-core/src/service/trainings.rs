//! Medical training operations.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::{Database, NamedQuery};
use crate::models::{MedicalSchool, MedicalTraining};

impl MedicalService<'_> {
    pub fn all_medical_trainings(&self) -> ServiceResult<Vec<MedicalTraining>> {
        tracing::debug!("all_medical_trainings");
        Ok(self.db.get_all(NamedQuery::MedicalTrainingFindAll)?)
    }

    pub fn medical_training_by_id(&self, id: i64) -> ServiceResult<Option<MedicalTraining>> {
        tracing::debug!(id, "medical_training_by_id");
        Ok(self.db.get_by_id(NamedQuery::MedicalTrainingFindById, id)?)
    }

    /// Persist a training under the school named by `school_id`, which must exist.
    pub fn create_medical_training(
        &self,
        training: MedicalTraining,
    ) -> ServiceResult<MedicalTraining> {
        let id = self.db.unit_of_work(|db| -> ServiceResult<i64> {
            require_school(db, training.school_id)?;
            let fresh = MedicalTraining::new(training.school_id, training.duration_and_status);
            Ok(db.insert_medical_training(&fresh)?)
        })?;

        tracing::info!(id, "medical training created");
        self.medical_training_by_id(id)?
            .ok_or_else(|| {
                ServiceError::Lookup(format!("medical training {} vanished after insert", id))
            })
    }

    /// Replace duration and status. A `school_id` of 0 keeps the current school.
    pub fn update_medical_training(
        &self,
        id: i64,
        changes: MedicalTraining,
    ) -> ServiceResult<Option<MedicalTraining>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) =
                db.get_by_id::<MedicalTraining>(NamedQuery::MedicalTrainingFindById, id)?
            else {
                return Ok(false);
            };
            check_version("medical training", changes.version, current.version)?;

            if changes.school_id != 0 && changes.school_id != current.school_id {
                require_school(db, changes.school_id)?;
                current.school_id = changes.school_id;
            }
            current.duration_and_status = changes.duration_and_status;
            Ok(db.update_medical_training(&current)?)
        })?;

        if !updated {
            tracing::warn!(id, "update of missing medical training");
            return Ok(None);
        }
        tracing::info!(id, "medical training updated");
        self.medical_training_by_id(id)
    }

    /// Remove a training together with its certificate, if it has one.
    pub fn delete_medical_training(&self, id: i64) -> ServiceResult<Option<MedicalTraining>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<MedicalTraining>> {
            let Some(training) =
                db.get_by_id::<MedicalTraining>(NamedQuery::MedicalTrainingFindById, id)?
            else {
                return Ok(None);
            };
            if let Some(certificate_id) = training.certificate_id {
                db.delete_medical_certificate(certificate_id)?;
            }
            db.delete_medical_training(id)?;
            Ok(Some(training))
        })?;

        match &removed {
            Some(training) => {
                tracing::info!(
                    id,
                    certificate = ?training.certificate_id,
                    "medical training deleted"
                )
            }
            None => tracing::warn!(id, "delete of missing medical training"),
        }
        Ok(removed)
    }
}

fn require_school(db: &Database, school_id: i64) -> ServiceResult<()> {
    let exists = db
        .get_by_id::<MedicalSchool>(NamedQuery::MedicalSchoolFindById, school_id)?
        .is_some();
    if !exists {
        return Err(ServiceError::Precondition(format!(
            "medical school {} not found",
            school_id
        )));
    }
    Ok(())
}
