//! Patient database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult, FromRow};
use crate::models::Patient;

impl FromRow for Patient {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Patient {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            year: row.get("year_of_birth")?,
            address: row.get("address")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            smoker: row.get("smoker")?,
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new patient, returning the assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO patient (
                first_name, last_name, year_of_birth, address, height, weight,
                smoker, created, updated, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1)
            "#,
            params![
                patient.first_name,
                patient.last_name,
                patient.year,
                patient.address,
                patient.height,
                patient.weight,
                patient.smoker,
                patient.created,
                patient.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient SET
                first_name = ?2,
                last_name = ?3,
                year_of_birth = ?4,
                address = ?5,
                height = ?6,
                weight = ?7,
                smoker = ?8,
                updated = ?9,
                version = version + 1
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.year,
                patient.address,
                patient.height,
                patient.weight,
                patient.smoker,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a patient. Their prescriptions go with them.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM patient WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    pub fn patient_exists(&self, id: i64) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM patient WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
