//! Prescription database operations.
//!
//! Prescriptions have no surrogate id; every lookup goes through the
//! physician + patient key.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult, FromRow, NamedQuery};
use crate::models::{Prescription, PrescriptionKey};

impl FromRow for Prescription {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Prescription {
            physician_id: row.get("physician_id")?,
            patient_id: row.get("patient_id")?,
            medicine_id: row.get("medicine_id")?,
            number_of_refills: row.get("number_of_refills")?,
            prescription_information: row.get("prescription_information")?,
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

const PRESCRIPTION_BY_KEY: &str = r#"
    SELECT physician_id, patient_id, medicine_id, number_of_refills,
           prescription_information, created, updated, version
    FROM prescription
    WHERE physician_id = ?1 AND patient_id = ?2
"#;

impl Database {
    pub fn prescription_by_key(&self, key: PrescriptionKey) -> DbResult<Option<Prescription>> {
        tracing::trace!(%key, "prescription_by_key");
        self.conn
            .query_row(
                PRESCRIPTION_BY_KEY,
                params![key.physician_id, key.patient_id],
                |row| Prescription::from_row(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Prescriptions written by one physician.
    pub fn prescriptions_for_physician(&self, physician_id: i64) -> DbResult<Vec<Prescription>> {
        self.get_all_by(NamedQuery::PrescriptionFindByPhysician, physician_id)
    }

    pub fn insert_prescription(&self, prescription: &Prescription) -> DbResult<PrescriptionKey> {
        self.conn.execute(
            r#"
            INSERT INTO prescription (
                physician_id, patient_id, medicine_id, number_of_refills,
                prescription_information, created, updated, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
            "#,
            params![
                prescription.physician_id,
                prescription.patient_id,
                prescription.medicine_id,
                prescription.number_of_refills,
                prescription.prescription_information,
                prescription.created,
                prescription.updated,
            ],
        )?;
        Ok(prescription.key())
    }

    /// Update medicine link, refills and information of the prescription
    /// identified by `prescription.key()`.
    pub fn update_prescription(&self, prescription: &Prescription) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE prescription SET
                medicine_id = ?3,
                number_of_refills = ?4,
                prescription_information = ?5,
                updated = ?6,
                version = version + 1
            WHERE physician_id = ?1 AND patient_id = ?2
            "#,
            params![
                prescription.physician_id,
                prescription.patient_id,
                prescription.medicine_id,
                prescription.number_of_refills,
                prescription.prescription_information,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete_prescription(&self, key: PrescriptionKey) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM prescription WHERE physician_id = ?1 AND patient_id = ?2",
            params![key.physician_id, key.patient_id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Whether `physician_id` has a prescription referencing `medicine_id`.
    pub fn physician_prescribes_medicine(
        &self,
        physician_id: i64,
        medicine_id: i64,
    ) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM prescription WHERE physician_id = ?1 AND medicine_id = ?2",
            params![physician_id, medicine_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medicine, Patient, Physician};

    fn setup() -> (Database, PrescriptionKey) {
        let db = Database::open_in_memory().unwrap();
        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let patient_id = db
            .insert_patient(&Patient::new("C", "D", 1970, 170, 70))
            .unwrap();
        (db, PrescriptionKey::new(physician_id, patient_id))
    }

    #[test]
    fn test_insert_and_get_by_key() {
        let (db, key) = setup();
        let mut prescription = Prescription::new(key);
        prescription.number_of_refills = 3;
        prescription.prescription_information = "twice daily".into();
        assert_eq!(db.insert_prescription(&prescription).unwrap(), key);

        let stored = db.prescription_by_key(key).unwrap().unwrap();
        assert_eq!(stored.number_of_refills, 3);
        assert_eq!(stored.medicine_id, None);

        let missing = PrescriptionKey::new(key.physician_id, key.patient_id + 1);
        assert!(db.prescription_by_key(missing).unwrap().is_none());
    }

    #[test]
    fn test_composite_key_unique() {
        let (db, key) = setup();
        db.insert_prescription(&Prescription::new(key)).unwrap();
        assert!(db.insert_prescription(&Prescription::new(key)).is_err());
    }

    #[test]
    fn test_medicine_reference_and_detach() {
        let (db, key) = setup();
        let medicine_id = db.insert_medicine(&Medicine::new("A", "B", "C")).unwrap();
        let mut prescription = Prescription::new(key);
        prescription.medicine_id = Some(medicine_id);
        db.insert_prescription(&prescription).unwrap();

        assert!(db
            .physician_prescribes_medicine(key.physician_id, medicine_id)
            .unwrap());
        assert_eq!(db.detach_medicine_from_prescriptions(medicine_id).unwrap(), 1);
        assert!(!db
            .physician_prescribes_medicine(key.physician_id, medicine_id)
            .unwrap());
    }

    #[test]
    fn test_cascade_from_patient() {
        let (db, key) = setup();
        db.insert_prescription(&Prescription::new(key)).unwrap();
        db.delete_patient(key.patient_id).unwrap();
        assert!(db.prescriptions_for_physician(key.physician_id).unwrap().is_empty());
    }
}
