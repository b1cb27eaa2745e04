//! Named queries and the generic find-all / find-by-id operations.

use rusqlite::{OptionalExtension, Row};

use super::{Database, DbResult};

/// Maps a result row onto a model.
///
/// Implementations read columns by name, so every query that feeds a type
/// must select the columns that type expects.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

const TRAINING_SELECT: &str = r#"
    SELECT t.id, t.school_id, t.start_date, t.end_date, t.active,
           t.created, t.updated, t.version, c.id AS certificate_id
    FROM medical_training t
    LEFT JOIN medical_certificate c ON c.training_id = t.id
"#;

/// Logical query names for the simple list/find cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedQuery {
    PhysicianFindAll,
    PhysicianFindById,
    PatientFindAll,
    PatientFindById,
    MedicalSchoolFindAll,
    MedicalSchoolFindById,
    MedicalTrainingFindAll,
    MedicalTrainingFindById,
    MedicalTrainingFindBySchool,
    MedicalCertificateFindAll,
    MedicalCertificateFindById,
    MedicineFindAll,
    MedicineFindById,
    PrescriptionFindAll,
    PrescriptionFindByPhysician,
}

impl NamedQuery {
    /// Stable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            NamedQuery::PhysicianFindAll => "Physician.findAll",
            NamedQuery::PhysicianFindById => "Physician.findById",
            NamedQuery::PatientFindAll => "Patient.findAll",
            NamedQuery::PatientFindById => "Patient.findById",
            NamedQuery::MedicalSchoolFindAll => "MedicalSchool.findAll",
            NamedQuery::MedicalSchoolFindById => "MedicalSchool.findById",
            NamedQuery::MedicalTrainingFindAll => "MedicalTraining.findAll",
            NamedQuery::MedicalTrainingFindById => "MedicalTraining.findById",
            NamedQuery::MedicalTrainingFindBySchool => "MedicalTraining.findBySchool",
            NamedQuery::MedicalCertificateFindAll => "MedicalCertificate.findAll",
            NamedQuery::MedicalCertificateFindById => "MedicalCertificate.findById",
            NamedQuery::MedicineFindAll => "Medicine.findAll",
            NamedQuery::MedicineFindById => "Medicine.findById",
            NamedQuery::PrescriptionFindAll => "Prescription.findAll",
            NamedQuery::PrescriptionFindByPhysician => "Prescription.findByPhysician",
        }
    }

    /// SQL text. Queries ending in `ById`/`By*` take one `?1` parameter.
    pub fn sql(self) -> String {
        match self {
            NamedQuery::PhysicianFindAll => {
                "SELECT id, first_name, last_name, created, updated, version
                 FROM physician ORDER BY id"
                    .into()
            }
            NamedQuery::PhysicianFindById => {
                "SELECT id, first_name, last_name, created, updated, version
                 FROM physician WHERE id = ?1"
                    .into()
            }
            NamedQuery::PatientFindAll => {
                "SELECT id, first_name, last_name, year_of_birth, address, height, weight,
                        smoker, created, updated, version
                 FROM patient ORDER BY id"
                    .into()
            }
            NamedQuery::PatientFindById => {
                "SELECT id, first_name, last_name, year_of_birth, address, height, weight,
                        smoker, created, updated, version
                 FROM patient WHERE id = ?1"
                    .into()
            }
            NamedQuery::MedicalSchoolFindAll => {
                "SELECT id, name, public, created, updated, version
                 FROM medical_school ORDER BY id"
                    .into()
            }
            NamedQuery::MedicalSchoolFindById => {
                "SELECT id, name, public, created, updated, version
                 FROM medical_school WHERE id = ?1"
                    .into()
            }
            NamedQuery::MedicalTrainingFindAll => format!("{} ORDER BY t.id", TRAINING_SELECT),
            NamedQuery::MedicalTrainingFindById => format!("{} WHERE t.id = ?1", TRAINING_SELECT),
            NamedQuery::MedicalTrainingFindBySchool => {
                format!("{} WHERE t.school_id = ?1 ORDER BY t.id", TRAINING_SELECT)
            }
            NamedQuery::MedicalCertificateFindAll => {
                "SELECT id, training_id, physician_id, signed, created, updated, version
                 FROM medical_certificate ORDER BY id"
                    .into()
            }
            NamedQuery::MedicalCertificateFindById => {
                "SELECT id, training_id, physician_id, signed, created, updated, version
                 FROM medical_certificate WHERE id = ?1"
                    .into()
            }
            NamedQuery::MedicineFindAll => {
                "SELECT id, drug_name, manufacturer_name, dosage_information, generic_name,
                        created, updated, version
                 FROM medicine ORDER BY id"
                    .into()
            }
            NamedQuery::MedicineFindById => {
                "SELECT id, drug_name, manufacturer_name, dosage_information, generic_name,
                        created, updated, version
                 FROM medicine WHERE id = ?1"
                    .into()
            }
            NamedQuery::PrescriptionFindAll => {
                "SELECT physician_id, patient_id, medicine_id, number_of_refills,
                        prescription_information, created, updated, version
                 FROM prescription ORDER BY physician_id, patient_id"
                    .into()
            }
            NamedQuery::PrescriptionFindByPhysician => {
                "SELECT physician_id, patient_id, medicine_id, number_of_refills,
                        prescription_information, created, updated, version
                 FROM prescription WHERE physician_id = ?1 ORDER BY patient_id"
                    .into()
            }
        }
    }
}

impl Database {
    /// Run a parameterless named query and map every row.
    pub fn get_all<T: FromRow>(&self, query: NamedQuery) -> DbResult<Vec<T>> {
        tracing::trace!(query = query.name(), "get_all");
        let mut stmt = self.conn.prepare(&query.sql())?;
        let rows = stmt.query_map([], |row| T::from_row(row))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Run a single-parameter named query and map every row.
    pub fn get_all_by<T: FromRow>(&self, query: NamedQuery, param: i64) -> DbResult<Vec<T>> {
        tracing::trace!(query = query.name(), param, "get_all_by");
        let mut stmt = self.conn.prepare(&query.sql())?;
        let rows = stmt.query_map([param], |row| T::from_row(row))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Run a by-id named query; `None` when no row matches.
    pub fn get_by_id<T: FromRow>(&self, query: NamedQuery, id: i64) -> DbResult<Option<T>> {
        tracing::trace!(query = query.name(), id, "get_by_id");
        self.conn
            .query_row(&query.sql(), [id], |row| T::from_row(row))
            .optional()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medicine, Physician};

    #[test]
    fn test_all_queries_prepare() {
        let db = Database::open_in_memory().unwrap();
        for query in [
            NamedQuery::PhysicianFindAll,
            NamedQuery::PhysicianFindById,
            NamedQuery::PatientFindAll,
            NamedQuery::PatientFindById,
            NamedQuery::MedicalSchoolFindAll,
            NamedQuery::MedicalSchoolFindById,
            NamedQuery::MedicalTrainingFindAll,
            NamedQuery::MedicalTrainingFindById,
            NamedQuery::MedicalTrainingFindBySchool,
            NamedQuery::MedicalCertificateFindAll,
            NamedQuery::MedicalCertificateFindById,
            NamedQuery::MedicineFindAll,
            NamedQuery::MedicineFindById,
            NamedQuery::PrescriptionFindAll,
            NamedQuery::PrescriptionFindByPhysician,
        ] {
            assert!(
                db.conn().prepare(&query.sql()).is_ok(),
                "{} should prepare",
                query.name()
            );
        }
    }

    #[test]
    fn test_generic_get() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_physician(&Physician::new("Ann", "Lee")).unwrap();

        let found: Option<Physician> = db.get_by_id(NamedQuery::PhysicianFindById, id).unwrap();
        assert_eq!(found.unwrap().first_name, "Ann");

        let missing: Option<Physician> =
            db.get_by_id(NamedQuery::PhysicianFindById, id + 100).unwrap();
        assert!(missing.is_none());

        let all: Vec<Physician> = db.get_all(NamedQuery::PhysicianFindAll).unwrap();
        assert_eq!(all.len(), 1);

        let medicines: Vec<Medicine> = db.get_all(NamedQuery::MedicineFindAll).unwrap();
        assert!(medicines.is_empty());
    }
}
