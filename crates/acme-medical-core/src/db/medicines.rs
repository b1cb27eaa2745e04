//! Medicine database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult, FromRow};
use crate::models::Medicine;

impl FromRow for Medicine {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Medicine {
            id: row.get("id")?,
            drug_name: row.get("drug_name")?,
            manufacturer_name: row.get("manufacturer_name")?,
            dosage_information: row.get("dosage_information")?,
            generic_name: row.get("generic_name")?,
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new medicine, returning the assigned id.
    pub fn insert_medicine(&self, medicine: &Medicine) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medicine (
                drug_name, manufacturer_name, dosage_information, generic_name,
                created, updated, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
            "#,
            params![
                medicine.drug_name,
                medicine.manufacturer_name,
                medicine.dosage_information,
                medicine.generic_name,
                medicine.created,
                medicine.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_medicine(&self, medicine: &Medicine) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicine SET
                drug_name = ?2,
                manufacturer_name = ?3,
                dosage_information = ?4,
                generic_name = ?5,
                updated = ?6,
                version = version + 1
            WHERE id = ?1
            "#,
            params![
                medicine.id,
                medicine.drug_name,
                medicine.manufacturer_name,
                medicine.dosage_information,
                medicine.generic_name,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Clear the medicine link of every prescription pointing at `medicine_id`.
    /// Returns how many prescriptions were touched.
    pub fn detach_medicine_from_prescriptions(&self, medicine_id: i64) -> DbResult<usize> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE prescription SET
                medicine_id = NULL,
                updated = ?2,
                version = version + 1
            WHERE medicine_id = ?1
            "#,
            params![medicine_id, crate::models::timestamp()],
        )?;
        Ok(rows_affected)
    }

    pub fn delete_medicine(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM medicine WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    pub fn medicine_exists(&self, id: i64) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM medicine WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
