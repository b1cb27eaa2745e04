//! Medical training model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Period of a training and whether it is still running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DurationAndStatus {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default, deserialize_with = "super::flag::deserialize")]
    pub active: bool,
}

/// A training given by one medical school, optionally certified.
///
/// Equality and hashing use id + duration and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalTraining {
    #[serde(default)]
    pub id: i64,
    /// Owning school; supplied by the path when created through a school
    #[serde(default)]
    pub school_id: i64,
    /// Linked certificate, derived from the certificate side of the 1:1
    #[serde(default, skip_deserializing)]
    pub certificate_id: Option<i64>,
    pub duration_and_status: DurationAndStatus,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub version: i64,
}

impl MedicalTraining {
    pub fn new(school_id: i64, duration_and_status: DurationAndStatus) -> Self {
        let now = super::timestamp();
        Self {
            id: 0,
            school_id,
            certificate_id: None,
            duration_and_status,
            created: now.clone(),
            updated: now,
            version: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.duration_and_status.active
    }
}

impl PartialEq for MedicalTraining {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.duration_and_status == other.duration_and_status
    }
}

impl Eq for MedicalTraining {}

impl Hash for MedicalTraining {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.duration_and_status.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(active: bool) -> DurationAndStatus {
        DurationAndStatus {
            start_date: NaiveDate::from_ymd_opt(2023, 9, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            active,
        }
    }

    #[test]
    fn test_identity_ignores_school_and_audit() {
        let mut a = MedicalTraining::new(1, period(true));
        a.id = 5;
        let mut b = MedicalTraining::new(2, period(true));
        b.id = 5;
        b.version = 4;
        assert_eq!(a, b);

        b.duration_and_status.active = false;
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_json() {
        let training: MedicalTraining = serde_json::from_str(
            r#"{"durationAndStatus": {"startDate": "2023-09-01T08:00:00",
                "endDate": "2024-06-30T17:00:00", "active": 1},
                "certificateId": 99}"#,
        )
        .unwrap();
        assert!(training.is_active());
        assert_eq!(training.school_id, 0);
        // Certificate link is never taken from the client
        assert_eq!(training.certificate_id, None);
    }
}
