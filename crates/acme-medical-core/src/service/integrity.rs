//! Integrity maintenance across the entity graph.
//!
//! These operations touch more than one table and are the reason the store
//! can keep its foreign keys strict:
//!
//! - a certificate blocks deletion of its training, so deleting a school
//!   first unlinks the certificates of its trainings
//! - an account blocks deletion of its physician, so the account goes first
//! - prescriptions never reference rows that are not stored

use super::{MedicalService, ServiceError, ServiceResult};
use crate::db::{Database, NamedQuery};
use crate::models::{MedicalSchool, Medicine, Physician, Prescription};

impl MedicalService<'_> {
    /// Delete a school and its trainings. Certificates of those trainings
    /// survive with their training link cleared.
    ///
    /// Returns the school as it was, trainings included.
    pub fn delete_medical_school(&self, id: i64) -> ServiceResult<Option<MedicalSchool>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<MedicalSchool>> {
            let Some(mut school) =
                db.get_by_id::<MedicalSchool>(NamedQuery::MedicalSchoolFindById, id)?
            else {
                return Ok(None);
            };
            school.medical_trainings = db.get_all_by(NamedQuery::MedicalTrainingFindBySchool, id)?;

            for training in &school.medical_trainings {
                if let Some(certificate_id) = training.certificate_id {
                    db.detach_certificate_from_training(certificate_id)?;
                    tracing::debug!(training = training.id, certificate_id, "certificate unlinked");
                }
                db.touch_medical_training(training.id)?;
            }

            db.delete_medical_school(id)?;
            Ok(Some(school))
        })?;

        match &removed {
            Some(school) => tracing::info!(
                id,
                trainings = school.medical_trainings.len(),
                "medical school deleted"
            ),
            None => tracing::warn!(id, "delete of missing medical school"),
        }
        Ok(removed)
    }

    /// Delete a physician together with its account. A physician without an
    /// account is a lookup failure and nothing is removed.
    pub fn delete_physician(&self, id: i64) -> ServiceResult<Option<Physician>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<Physician>> {
            let Some(physician) = db.get_by_id::<Physician>(NamedQuery::PhysicianFindById, id)?
            else {
                return Ok(None);
            };
            let user = db.security_user_for_physician(id)?.ok_or_else(|| {
                ServiceError::Lookup(format!("no security user linked to physician {}", id))
            })?;

            db.delete_security_user(user.id)?;
            db.delete_physician(id)?;
            Ok(Some(physician))
        })?;

        match &removed {
            Some(_) => tracing::info!(id, "physician and account deleted"),
            None => tracing::warn!(id, "delete of missing physician"),
        }
        Ok(removed)
    }

    /// Give the prescription of `physician_id` for `patient_id` the submitted
    /// medicine. A linked medicine is edited in place; otherwise the
    /// submitted one is stored and linked.
    ///
    /// `None` when the physician does not exist. Otherwise returns the
    /// submitted medicine, even when no prescription matched.
    pub fn set_medicine_for_physician_patient(
        &self,
        physician_id: i64,
        patient_id: i64,
        medicine: Medicine,
    ) -> ServiceResult<Option<Medicine>> {
        let outcome = self.db.unit_of_work(|db| -> ServiceResult<Option<usize>> {
            if !db.physician_exists(physician_id)? {
                return Ok(None);
            }

            let mut touched = 0;
            for mut prescription in db.prescriptions_for_physician(physician_id)? {
                if prescription.patient_id != patient_id {
                    continue;
                }

                let linked = match prescription.medicine_id {
                    Some(medicine_id) => {
                        db.get_by_id::<Medicine>(NamedQuery::MedicineFindById, medicine_id)?
                    }
                    None => None,
                };
                match linked {
                    Some(mut current) => {
                        current.drug_name = medicine.drug_name.clone();
                        current.manufacturer_name = medicine.manufacturer_name.clone();
                        current.dosage_information = medicine.dosage_information.clone();
                        db.update_medicine(&current)?;
                    }
                    None => {
                        let mut fresh = Medicine::new(
                            medicine.drug_name.clone(),
                            medicine.manufacturer_name.clone(),
                            medicine.dosage_information.clone(),
                        );
                        fresh.generic_name = medicine.generic_name.clone();
                        prescription.medicine_id = Some(db.insert_medicine(&fresh)?);
                        db.update_prescription(&prescription)?;
                    }
                }
                touched += 1;
            }
            Ok(Some(touched))
        })?;

        match outcome {
            Some(touched) => {
                tracing::info!(physician_id, patient_id, touched, "medicine set for prescription");
                Ok(Some(medicine))
            }
            None => {
                tracing::warn!(physician_id, "set medicine for missing physician");
                Ok(None)
            }
        }
    }
}

/// Physician, patient and any referenced medicine of `prescription` must be
/// stored rows.
pub(super) fn ensure_prescription_preconditions(
    db: &Database,
    prescription: &Prescription,
) -> ServiceResult<()> {
    let key = prescription.key();
    if !db.physician_exists(key.physician_id)? || !db.patient_exists(key.patient_id)? {
        tracing::warn!(%key, "prescription for unknown physician or patient");
        return Err(ServiceError::Precondition(format!(
            "physician or patient not found, cannot create prescription for {}",
            key
        )));
    }
    if let Some(medicine_id) = prescription.medicine_id {
        if !db.medicine_exists(medicine_id)? {
            return Err(ServiceError::Precondition(format!(
                "medicine {} not found",
                medicine_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DurationAndStatus, MedicalCertificate, MedicalTraining, Patient, PrescriptionKey,
    };
    use crate::service::testing;
    use chrono::NaiveDate;

    fn period() -> DurationAndStatus {
        let start = NaiveDate::from_ymd_opt(2019, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        DurationAndStatus {
            start_date: start,
            end_date: start + chrono::Duration::days(365),
            active: false,
        }
    }

    #[test]
    fn test_delete_school_unlinks_certificates() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let school = service.create_medical_school(MedicalSchool::public("S")).unwrap();
        let other = service.create_medical_school(MedicalSchool::public("T")).unwrap();

        let mut certificates = Vec::new();
        for i in 0..3 {
            let training = service
                .add_training_to_school(school.id, MedicalTraining::new(0, period()))
                .unwrap()
                .unwrap();
            if i < 2 {
                certificates.push(
                    db.insert_medical_certificate(&MedicalCertificate::new(
                        training.id,
                        physician_id,
                        true,
                    ))
                    .unwrap(),
                );
            }
        }
        service
            .add_training_to_school(other.id, MedicalTraining::new(0, period()))
            .unwrap();

        let removed = service.delete_medical_school(school.id).unwrap().unwrap();
        assert_eq!(removed.medical_trainings.len(), 3);

        let remaining: Vec<MedicalTraining> = db
            .get_all_by(NamedQuery::MedicalTrainingFindBySchool, school.id)
            .unwrap();
        assert!(remaining.is_empty());
        assert_eq!(service.all_medical_trainings().unwrap().len(), 1);

        for id in certificates {
            let certificate = service.medical_certificate_by_id(id).unwrap().unwrap();
            assert_eq!(certificate.training_id, None);
        }
        assert!(service.delete_medical_school(school.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_physician_removes_account() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let physician = service.create_physician(Physician::new("John", "Doe")).unwrap();
        let removed = service.delete_physician(physician.id).unwrap().unwrap();
        assert_eq!(removed.id, physician.id);
        assert!(db.security_user_by_username("user_John.Doe").unwrap().is_none());
        assert!(service.delete_physician(physician.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_physician_without_account_fails() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let id = db.insert_physician(&Physician::new("No", "Account")).unwrap();
        let result = service.delete_physician(id);
        assert!(matches!(result, Err(ServiceError::Lookup(_))));
        assert!(service.physician_by_id(id).unwrap().is_some());
    }

    #[test]
    fn test_set_medicine_creates_then_edits() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let patient_id = db.insert_patient(&Patient::new("C", "D", 1975, 180, 90)).unwrap();
        let other_patient = db.insert_patient(&Patient::new("E", "F", 1976, 160, 50)).unwrap();
        let key = PrescriptionKey::new(physician_id, patient_id);
        let other_key = PrescriptionKey::new(physician_id, other_patient);
        db.insert_prescription(&Prescription::new(key)).unwrap();
        db.insert_prescription(&Prescription::new(other_key)).unwrap();

        let first = Medicine::new("Advil", "Pfizer", "200mg");
        let returned = service
            .set_medicine_for_physician_patient(physician_id, patient_id, first.clone())
            .unwrap()
            .unwrap();
        assert_eq!(returned, first);

        let medicine_id = db.prescription_by_key(key).unwrap().unwrap().medicine_id.unwrap();
        assert_eq!(db.prescription_by_key(other_key).unwrap().unwrap().medicine_id, None);

        service
            .set_medicine_for_physician_patient(
                physician_id,
                patient_id,
                Medicine::new("Motrin", "J&J", "400mg"),
            )
            .unwrap()
            .unwrap();
        let edited = service.medicine_by_id(medicine_id).unwrap().unwrap();
        assert_eq!(edited.drug_name, "Motrin");
        assert_eq!(edited.dosage_information, "400mg");
        assert_eq!(service.all_medicines().unwrap().len(), 1);
    }

    #[test]
    fn test_set_medicine_unknown_physician() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let result = service
            .set_medicine_for_physician_patient(42, 1, Medicine::new("A", "B", "C"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_prescription_preconditions_block_write() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let result = service.create_prescription(Prescription::new(PrescriptionKey::new(
            physician_id,
            99,
        )));
        assert!(matches!(result, Err(ServiceError::Precondition(_))));

        let result =
            service.create_prescription(Prescription::new(PrescriptionKey::new(99, 1)));
        assert!(matches!(result, Err(ServiceError::Precondition(_))));
        assert!(service.all_prescriptions().unwrap().is_empty());
    }
}
