//! Medical school database operations.

use rusqlite::types::Type;
use rusqlite::{params, Row};

use super::{Database, DbResult, FromRow};
use crate::models::{MedicalSchool, SchoolKind};

impl FromRow for MedicalSchool {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let discriminator: i64 = row.get("public")?;
        let kind = SchoolKind::from_discriminator(discriminator).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                row.as_ref().column_index("public").unwrap_or(0),
                Type::Integer,
                format!("Unknown school discriminator: {}", discriminator).into(),
            )
        })?;

        Ok(MedicalSchool {
            id: row.get("id")?,
            name: row.get("name")?,
            kind,
            medical_trainings: Vec::new(),
            created: row.get("created")?,
            updated: row.get("updated")?,
            version: row.get("version")?,
        })
    }
}

impl Database {
    /// Insert a new school, returning the assigned id.
    pub fn insert_medical_school(&self, school: &MedicalSchool) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medical_school (name, public, created, updated, version)
            VALUES (?1, ?2, ?3, ?4, 1)
            "#,
            params![
                school.name,
                school.kind.discriminator(),
                school.created,
                school.updated,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Rename a school.
    pub fn update_medical_school(&self, school: &MedicalSchool) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medical_school SET
                name = ?2,
                updated = ?3,
                version = version + 1
            WHERE id = ?1
            "#,
            params![school.id, school.name, crate::models::timestamp()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a school. Its trainings go with it.
    pub fn delete_medical_school(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_school WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Number of schools with exactly this name (no trimming, case-sensitive).
    pub fn count_medical_schools_named(&self, name: &str) -> DbResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM medical_school WHERE name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Whether a school other than `id` already uses `name`.
    pub fn medical_school_name_taken(&self, name: &str, id: i64) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM medical_school WHERE name = ?1 AND id <> ?2",
            params![name, id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
