//! SQLite schema definition.

/// Complete database schema for the medical records store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Physicians
-- ============================================================================

CREATE TABLE IF NOT EXISTS physician (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
    last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patient (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
    last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
    year_of_birth INTEGER NOT NULL,
    address TEXT CHECK (address IS NULL OR length(address) <= 255),
    height INTEGER NOT NULL,
    weight INTEGER NOT NULL,
    smoker INTEGER NOT NULL DEFAULT 0 CHECK (smoker IN (0, 1)),
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_patient_name ON patient(last_name, first_name);

-- ============================================================================
-- Medical Schools (single table; public = 1 public, 0 private)
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_school (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(name) <= 100),
    public INTEGER NOT NULL CHECK (public IN (0, 1)),
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

-- ============================================================================
-- Medical Trainings (owned by a school)
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_training (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    school_id INTEGER NOT NULL REFERENCES medical_school(id) ON DELETE CASCADE,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 0 CHECK (active IN (0, 1)),
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_training_school ON medical_training(school_id);

-- ============================================================================
-- Medical Certificates (owned by a physician, 1:1 with a training)
-- ============================================================================

-- No ON DELETE action on training_id: a training cannot be removed while a
-- certificate still points at it.
CREATE TABLE IF NOT EXISTS medical_certificate (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    training_id INTEGER UNIQUE REFERENCES medical_training(id),
    physician_id INTEGER NOT NULL REFERENCES physician(id) ON DELETE CASCADE,
    signed INTEGER NOT NULL DEFAULT 0 CHECK (signed IN (0, 1)),
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_certificate_physician ON medical_certificate(physician_id);

-- ============================================================================
-- Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicine (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    drug_name TEXT NOT NULL,
    manufacturer_name TEXT NOT NULL,
    dosage_information TEXT NOT NULL,
    generic_name TEXT,
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

-- ============================================================================
-- Prescriptions (composite key physician + patient)
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescription (
    physician_id INTEGER NOT NULL REFERENCES physician(id) ON DELETE CASCADE,
    patient_id INTEGER NOT NULL REFERENCES patient(id) ON DELETE CASCADE,
    medicine_id INTEGER REFERENCES medicine(id),
    number_of_refills INTEGER NOT NULL DEFAULT 0,
    prescription_information TEXT NOT NULL DEFAULT '',
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (physician_id, patient_id)
);

CREATE INDEX IF NOT EXISTS idx_prescription_patient ON prescription(patient_id);
CREATE INDEX IF NOT EXISTS idx_prescription_medicine ON prescription(medicine_id);

-- ============================================================================
-- Security
-- ============================================================================

CREATE TABLE IF NOT EXISTS security_role (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- No ON DELETE action on physician_id: the account must be removed before
-- its physician.
CREATE TABLE IF NOT EXISTS security_user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    physician_id INTEGER UNIQUE REFERENCES physician(id)
);

CREATE TABLE IF NOT EXISTS security_user_has_role (
    user_id INTEGER NOT NULL REFERENCES security_user(id) ON DELETE CASCADE,
    role_id INTEGER NOT NULL REFERENCES security_role(id),
    PRIMARY KEY (user_id, role_id)
);

INSERT OR IGNORE INTO security_role (name) VALUES ('ADMIN_ROLE');
INSERT OR IGNORE INTO security_role (name) VALUES ('USER_ROLE');
"#;
