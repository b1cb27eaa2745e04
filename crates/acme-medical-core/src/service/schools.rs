//! Medical school operations.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::{DbError, NamedQuery};
use crate::models::{MedicalSchool, MedicalTraining};

impl MedicalService<'_> {
    /// Every school, without trainings.
    pub fn all_medical_schools(&self) -> ServiceResult<Vec<MedicalSchool>> {
        tracing::debug!("all_medical_schools");
        Ok(self.db.get_all(NamedQuery::MedicalSchoolFindAll)?)
    }

    /// One school with its trainings loaded.
    pub fn medical_school_by_id(&self, id: i64) -> ServiceResult<Option<MedicalSchool>> {
        tracing::debug!(id, "medical_school_by_id");
        let Some(mut school) = self
            .db
            .get_by_id::<MedicalSchool>(NamedQuery::MedicalSchoolFindById, id)?
        else {
            return Ok(None);
        };
        school.medical_trainings = self
            .db
            .get_all_by(NamedQuery::MedicalTrainingFindBySchool, id)?;
        Ok(Some(school))
    }

    /// Whether a school with exactly this name exists.
    pub fn is_duplicated(&self, name: &str) -> ServiceResult<bool> {
        Ok(self.db.count_medical_schools_named(name)? > 0)
    }

    /// Persist a school and any trainings submitted with it.
    pub fn create_medical_school(&self, school: MedicalSchool) -> ServiceResult<MedicalSchool> {
        let id = self.db.unit_of_work(|db| -> ServiceResult<i64> {
            if db.count_medical_schools_named(&school.name)? > 0 {
                tracing::warn!(name = %school.name, "duplicate school name");
                return Err(ServiceError::Duplicate(format!(
                    "medical school {} already exists",
                    school.name
                )));
            }

            let fresh = MedicalSchool::new(school.name.clone(), school.kind);
            let id = db
                .insert_medical_school(&fresh)
                .map_err(|e| duplicate_name(e, &school.name))?;
            for training in &school.medical_trainings {
                let fresh = MedicalTraining::new(id, training.duration_and_status.clone());
                db.insert_medical_training(&fresh)?;
            }
            Ok(id)
        })?;

        tracing::info!(id, "medical school created");
        self.medical_school_by_id(id)?
            .ok_or_else(|| {
                ServiceError::Lookup(format!("medical school {} vanished after insert", id))
            })
    }

    /// Rename a school. The public/private kind is fixed at creation.
    pub fn update_medical_school(
        &self,
        id: i64,
        changes: MedicalSchool,
    ) -> ServiceResult<Option<MedicalSchool>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) =
                db.get_by_id::<MedicalSchool>(NamedQuery::MedicalSchoolFindById, id)?
            else {
                return Ok(false);
            };
            check_version("medical school", changes.version, current.version)?;

            if db.medical_school_name_taken(&changes.name, id)? {
                return Err(ServiceError::Duplicate(format!(
                    "medical school {} already exists",
                    changes.name
                )));
            }
            current.name = changes.name;
            db.update_medical_school(&current)
                .map_err(|e| duplicate_name(e, &current.name))
        })?;

        if !updated {
            tracing::warn!(id, "update of missing medical school");
            return Ok(None);
        }
        tracing::info!(id, "medical school updated");
        self.medical_school_by_id(id)
    }

    /// Create a training under an existing school. `None` if the school
    /// does not exist.
    pub fn add_training_to_school(
        &self,
        school_id: i64,
        training: MedicalTraining,
    ) -> ServiceResult<Option<MedicalTraining>> {
        let id = self.db.unit_of_work(|db| -> ServiceResult<Option<i64>> {
            if db
                .get_by_id::<MedicalSchool>(NamedQuery::MedicalSchoolFindById, school_id)?
                .is_none()
            {
                return Ok(None);
            }
            let fresh = MedicalTraining::new(school_id, training.duration_and_status);
            Ok(Some(db.insert_medical_training(&fresh)?))
        })?;

        match id {
            Some(id) => {
                tracing::info!(id, school_id, "training added to school");
                self.medical_training_by_id(id)
            }
            None => {
                tracing::warn!(school_id, "training for missing school");
                Ok(None)
            }
        }
    }
}

/// A UNIQUE(name) rejection from the store is a duplicate like any other.
fn duplicate_name(error: DbError, name: &str) -> ServiceError {
    if error.is_unique_violation() {
        tracing::warn!(%name, "duplicate school name rejected by store");
        ServiceError::Duplicate(format!("medical school {} already exists", name))
    } else {
        error.into()
    }
}
