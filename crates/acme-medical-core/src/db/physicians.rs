//! Physician database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult, FromRow};
use crate::models::Physician;

impl FromRow for Physician {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Physician {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new physician, returning the assigned id.
    pub fn insert_physician(&self, physician: &Physician) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO physician (first_name, last_name, created, updated, version)
            VALUES (?1, ?2, ?3, ?4, 1)
            "#,
            params![
                physician.first_name,
                physician.last_name,
                physician.created,
                physician.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update names of an existing physician and bump its version.
    pub fn update_physician(&self, physician: &Physician) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE physician SET
                first_name = ?2,
                last_name = ?3,
                updated = ?4,
                version = version + 1
            WHERE id = ?1
            "#,
            params![
                physician.id,
                physician.first_name,
                physician.last_name,
                crate::models::timestamp(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a physician. Certificates and prescriptions go with it.
    pub fn delete_physician(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM physician WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Whether a physician row exists.
    pub fn physician_exists(&self, id: i64) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM physician WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
