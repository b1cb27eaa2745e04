//! Prescription operations.

use super::integrity::ensure_prescription_preconditions;
use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::NamedQuery;
use crate::models::{timestamp, Prescription, PrescriptionKey};

impl MedicalService<'_> {
    pub fn all_prescriptions(&self) -> ServiceResult<Vec<Prescription>> {
        tracing::debug!("all_prescriptions");
        Ok(self.db.get_all(NamedQuery::PrescriptionFindAll)?)
    }

    pub fn prescription_by_key(&self, key: PrescriptionKey) -> ServiceResult<Option<Prescription>> {
        tracing::debug!(%key, "prescription_by_key");
        Ok(self.db.prescription_by_key(key)?)
    }

    /// Persist a prescription. Physician, patient and any referenced
    /// medicine must already be stored; nothing is written otherwise.
    pub fn create_prescription(
        &self,
        mut prescription: Prescription,
    ) -> ServiceResult<Prescription> {
        let key = prescription.key();
        let now = timestamp();
        prescription.created = now.clone();
        prescription.updated = now;

        self.db.unit_of_work(|db| -> ServiceResult<()> {
            ensure_prescription_preconditions(db, &prescription)?;
            if db.prescription_by_key(key)?.is_some() {
                return Err(ServiceError::Duplicate(format!(
                    "prescription for {} already exists",
                    key
                )));
            }
            db.insert_prescription(&prescription)?;
            Ok(())
        })?;

        tracing::info!(%key, "prescription created");
        self.prescription_by_key(key)?
            .ok_or_else(|| {
                ServiceError::Lookup(format!("prescription for {} vanished after insert", key))
            })
    }

    /// Replace refills and information. The medicine link changes only when
    /// one is supplied.
    pub fn update_prescription(
        &self,
        key: PrescriptionKey,
        changes: Prescription,
    ) -> ServiceResult<Option<Prescription>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) = db.prescription_by_key(key)? else {
                return Ok(false);
            };
            check_version("prescription", changes.version, current.version)?;

            if let Some(medicine_id) = changes.medicine_id {
                if !db.medicine_exists(medicine_id)? {
                    return Err(ServiceError::Precondition(format!(
                        "medicine {} not found",
                        medicine_id
                    )));
                }
                current.medicine_id = Some(medicine_id);
            }
            current.number_of_refills = changes.number_of_refills;
            current.prescription_information = changes.prescription_information;
            Ok(db.update_prescription(&current)?)
        })?;

        if !updated {
            tracing::warn!(%key, "update of missing prescription");
            return Ok(None);
        }
        tracing::info!(%key, "prescription updated");
        self.prescription_by_key(key)
    }

    pub fn delete_prescription(&self, key: PrescriptionKey) -> ServiceResult<Option<Prescription>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<Prescription>> {
            let Some(prescription) = db.prescription_by_key(key)? else {
                return Ok(None);
            };
            db.delete_prescription(key)?;
            Ok(Some(prescription))
        })?;

        match &removed {
            Some(_) => tracing::info!(%key, "prescription deleted"),
            None => tracing::warn!(%key, "delete of missing prescription"),
        }
        Ok(removed)
    }
}
