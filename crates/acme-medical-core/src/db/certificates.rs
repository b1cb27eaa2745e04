//! Medical certificate database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult, FromRow, NamedQuery};
use crate::models::MedicalCertificate;

impl FromRow for MedicalCertificate {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MedicalCertificate {
            id: row.get("id")?,
            training_id: row.get("training_id")?,
            owner_id: row.get("physician_id")?,
            signed: row.get("signed")?,
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new certificate, returning the assigned id.
    pub fn insert_medical_certificate(&self, certificate: &MedicalCertificate) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medical_certificate (
                training_id, physician_id, signed, created, updated, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, 1)
            "#,
            params![
                certificate.training_id,
                certificate.owner_id,
                certificate.signed,
                certificate.created,
                certificate.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update training link, owner and signed flag.
    pub fn update_medical_certificate(&self, certificate: &MedicalCertificate) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medical_certificate SET
                training_id = ?2,
                physician_id = ?3,
                signed = ?4,
                updated = ?5,
                version = version + 1
            WHERE id = ?1
            "#,
            params![
                certificate.id,
                certificate.training_id,
                certificate.owner_id,
                certificate.signed,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Clear a certificate's link to its training.
    pub fn detach_certificate_from_training(&self, certificate_id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medical_certificate SET
                training_id = NULL,
                updated = ?2,
                version = version + 1
            WHERE id = ?1
            "#,
            params![certificate_id, crate::models::timestamp()],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete_medical_certificate(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_certificate WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Certificate linked to a training, if any.
    pub fn certificate_for_training(
        &self,
        training_id: i64,
    ) -> DbResult<Option<MedicalCertificate>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM medical_certificate WHERE training_id = ?",
                [training_id],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => self.get_by_id(NamedQuery::MedicalCertificateFindById, id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationAndStatus, MedicalSchool, MedicalTraining, Physician};
    use chrono::NaiveDate;

    fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().unwrap();
        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let school_id = db.insert_medical_school(&MedicalSchool::public("S")).unwrap();
        let start = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let training_id = db
            .insert_medical_training(&MedicalTraining::new(
                school_id,
                DurationAndStatus {
                    start_date: start,
                    end_date: start,
                    active: false,
                },
            ))
            .unwrap();
        (db, physician_id, training_id)
    }

    #[test]
    fn test_insert_and_lookup_by_training() {
        let (db, physician_id, training_id) = setup();
        let id = db
            .insert_medical_certificate(&MedicalCertificate::new(training_id, physician_id, true))
            .unwrap();

        let found = db.certificate_for_training(training_id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.owner_id, physician_id);
        assert!(found.signed);
    }

    #[test]
    fn test_detach() {
        let (db, physician_id, training_id) = setup();
        let id = db
            .insert_medical_certificate(&MedicalCertificate::new(training_id, physician_id, false))
            .unwrap();

        assert!(db.detach_certificate_from_training(id).unwrap());
        assert!(db.certificate_for_training(training_id).unwrap().is_none());

        let certificate: MedicalCertificate = db
            .get_by_id(NamedQuery::MedicalCertificateFindById, id)
            .unwrap()
            .unwrap();
        assert_eq!(certificate.training_id, None);
        assert_eq!(certificate.version, 2);
    }

    #[test]
    fn test_one_certificate_per_training() {
        let (db, physician_id, training_id) = setup();
        db.insert_medical_certificate(&MedicalCertificate::new(training_id, physician_id, false))
            .unwrap();
        let duplicate = MedicalCertificate::new(training_id, physician_id, false);
        let second = db.insert_medical_certificate(&duplicate);
        assert!(second.is_err());
    }
}
