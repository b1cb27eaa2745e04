//! Medicine operations.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::NamedQuery;
use crate::models::{timestamp, Medicine};
use crate::security::Caller;

impl MedicalService<'_> {
    pub fn all_medicines(&self) -> ServiceResult<Vec<Medicine>> {
        tracing::debug!("all_medicines");
        Ok(self.db.get_all(NamedQuery::MedicineFindAll)?)
    }

    pub fn medicine_by_id(&self, id: i64) -> ServiceResult<Option<Medicine>> {
        tracing::debug!(id, "medicine_by_id");
        Ok(self.db.get_by_id(NamedQuery::MedicineFindById, id)?)
    }

    pub fn create_medicine(&self, mut medicine: Medicine) -> ServiceResult<Medicine> {
        let now = timestamp();
        medicine.created = now.clone();
        medicine.updated = now;

        let id = self
            .db
            .unit_of_work(|db| -> ServiceResult<i64> { Ok(db.insert_medicine(&medicine)?) })?;
        tracing::info!(id, "medicine created");
        self.medicine_by_id(id)?
            .ok_or_else(|| ServiceError::Lookup(format!("medicine {} vanished after insert", id)))
    }

    /// Replace drug, manufacturer and dosage. The generic name changes only
    /// when one is supplied.
    pub fn update_medicine(&self, id: i64, changes: Medicine) -> ServiceResult<Option<Medicine>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) = db.get_by_id::<Medicine>(NamedQuery::MedicineFindById, id)?
            else {
                return Ok(false);
            };
            check_version("medicine", changes.version, current.version)?;
            current.set_medicine(&changes);
            Ok(db.update_medicine(&current)?)
        })?;

        if !updated {
            tracing::warn!(id, "update of missing medicine");
            return Ok(None);
        }
        tracing::info!(id, "medicine updated");
        self.medicine_by_id(id)
    }

    /// Remove a medicine after clearing it from every prescription.
    pub fn delete_medicine(&self, id: i64) -> ServiceResult<Option<Medicine>> {
        let removed = self.db.unit_of_work(|db| -> ServiceResult<Option<Medicine>> {
            let Some(medicine) = db.get_by_id::<Medicine>(NamedQuery::MedicineFindById, id)? else {
                return Ok(None);
            };
            let detached = db.detach_medicine_from_prescriptions(id)?;
            db.delete_medicine(id)?;
            tracing::debug!(id, detached, "medicine detached from prescriptions");
            Ok(Some(medicine))
        })?;

        match &removed {
            Some(_) => tracing::info!(id, "medicine deleted"),
            None => tracing::warn!(id, "delete of missing medicine"),
        }
        Ok(removed)
    }

    /// A USER owns a medicine that one of its physician's prescriptions references.
    pub fn owns_medicine(&self, caller: &Caller, id: i64) -> ServiceResult<bool> {
        match caller.physician_id {
            Some(physician_id) => Ok(self.db.physician_prescribes_medicine(physician_id, id)?),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Patient, Physician, Prescription, PrescriptionKey, Role};
    use crate::service::testing;

    #[test]
    fn test_update_keeps_generic_name() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let mut medicine = Medicine::new("Advil", "Pfizer", "200mg");
        medicine.generic_name = Some("Ibuprofen".into());
        let created = service.create_medicine(medicine).unwrap();

        let updated = service
            .update_medicine(created.id, Medicine::new("Motrin", "J&J", "400mg"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.drug_name, "Motrin");
        assert_eq!(updated.generic_name.as_deref(), Some("Ibuprofen"));
    }

    #[test]
    fn test_delete_detaches_and_ownership() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let patient_id = db.insert_patient(&Patient::new("C", "D", 1980, 170, 70)).unwrap();
        let medicine = service.create_medicine(Medicine::new("A", "B", "C")).unwrap();
        let key = PrescriptionKey::new(physician_id, patient_id);
        let mut prescription = Prescription::new(key);
        prescription.medicine_id = Some(medicine.id);
        db.insert_prescription(&prescription).unwrap();

        let owner = Caller {
            username: "user_A.B".into(),
            roles: vec![Role::User],
            physician_id: Some(physician_id),
        };
        let stranger = Caller {
            physician_id: Some(physician_id + 1),
            ..owner.clone()
        };
        assert!(service.owns_medicine(&owner, medicine.id).unwrap());
        assert!(!service.owns_medicine(&stranger, medicine.id).unwrap());

        assert!(service.delete_medicine(medicine.id).unwrap().is_some());
        let stored = db.prescription_by_key(key).unwrap().unwrap();
        assert_eq!(stored.medicine_id, None);
    }
}
