//! Medical training database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult, FromRow};
use crate::models::{DurationAndStatus, MedicalTraining};

impl FromRow for MedicalTraining {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MedicalTraining {
            id: row.get("id")?,
            school_id: row.get("school_id")?,
            certificate_id: row.get("certificate_id")?,
            duration_and_status: DurationAndStatus {
                start_date: row.get("start_date")?,
                end_date: row.get("end_date")?,
                active: row.get("active")?,
            },
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new training, returning the assigned id.
    pub fn insert_medical_training(&self, training: &MedicalTraining) -> DbResult<i64> {
        let period = &training.duration_and_status;
        self.conn.execute(
            r#"
            INSERT INTO medical_training (
                school_id, start_date, end_date, active, created, updated, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
            "#,
            params![
                training.school_id,
                period.start_date,
                period.end_date,
                period.active,
                training.created,
                training.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update school and duration/status of an existing training.
    pub fn update_medical_training(&self, training: &MedicalTraining) -> DbResult<bool> {
        let period = &training.duration_and_status;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medical_training SET
                school_id = ?2,
                start_date = ?3,
                end_date = ?4,
                active = ?5,
                updated = ?6,
                version = version + 1
            WHERE id = ?1
            "#,
            params![
                training.id,
                training.school_id,
                period.start_date,
                period.end_date,
                period.active,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Touch a training after one of its links changed.
    pub fn touch_medical_training(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medical_training SET updated = ?2, version = version + 1 WHERE id = ?1",
            params![id, crate::models::timestamp()],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete_medical_training(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_training WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    pub fn medical_training_exists(&self, id: i64) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM medical_training WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NamedQuery;
    use crate::models::MedicalSchool;
    use chrono::NaiveDate;

    fn period() -> DurationAndStatus {
        DurationAndStatus {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 20)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            active: true,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let school_id = db.insert_medical_school(&MedicalSchool::public("S")).unwrap();
        let id = db
            .insert_medical_training(&MedicalTraining::new(school_id, period()))
            .unwrap();

        let training: MedicalTraining = db
            .get_by_id(NamedQuery::MedicalTrainingFindById, id)
            .unwrap()
            .unwrap();
        assert_eq!(training.school_id, school_id);
        assert_eq!(training.duration_and_status, period());
        assert_eq!(training.certificate_id, None);
    }

    #[test]
    fn test_find_by_school() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_medical_school(&MedicalSchool::public("A")).unwrap();
        let b = db.insert_medical_school(&MedicalSchool::public("B")).unwrap();
        db.insert_medical_training(&MedicalTraining::new(a, period())).unwrap();
        db.insert_medical_training(&MedicalTraining::new(a, period())).unwrap();
        db.insert_medical_training(&MedicalTraining::new(b, period())).unwrap();

        let trainings: Vec<MedicalTraining> = db
            .get_all_by(NamedQuery::MedicalTrainingFindBySchool, a)
            .unwrap();
        assert_eq!(trainings.len(), 2);
        assert!(trainings.iter().all(|t| t.school_id == a));
    }

    #[test]
    fn test_training_requires_school() {
        let db = Database::open_in_memory().unwrap();
        let result = db.insert_medical_training(&MedicalTraining::new(99, period()));
        assert!(result.is_err());
    }
}
