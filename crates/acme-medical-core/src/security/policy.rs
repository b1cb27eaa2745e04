//! Access policy: which roles may perform which operation on which resource.
//!
//! The table is static. Object-level ownership is not decided here; when an
//! entry allows "owning USER", [`evaluate`] answers [`Access::NeedsOwnership`]
//! and the caller of the policy resolves ownership against the store.

use thiserror::Error;

use super::Caller;
use crate::models::Role;

/// Top-level REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Physician,
    Patient,
    Medicine,
    MedicalSchool,
    MedicalTraining,
    MedicalCertificate,
    Prescription,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Physician,
        Resource::Patient,
        Resource::Medicine,
        Resource::MedicalSchool,
        Resource::MedicalTraining,
        Resource::MedicalCertificate,
        Resource::Prescription,
    ];

    /// Path segment naming the resource.
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Physician => "physician",
            Resource::Patient => "patient",
            Resource::Medicine => "medicine",
            Resource::MedicalSchool => "medicalschool",
            Resource::MedicalTraining => "medicaltraining",
            Resource::MedicalCertificate => "medicalcertificate",
            Resource::Prescription => "prescription",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.segment() == segment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    GetOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::GetAll,
        Operation::GetOne,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];
}

/// What a caller must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any valid identity
    Authenticated,
    /// At least one of these roles
    AnyOf(&'static [Role]),
    /// ADMIN, or USER owning the addressed object
    AdminOrOwner,
}

const ADMIN: Requirement = Requirement::AnyOf(&[Role::Admin]);
const ADMIN_OR_USER: Requirement = Requirement::AnyOf(&[Role::Admin, Role::User]);

pub fn requirement(resource: Resource, operation: Operation) -> Requirement {
    use Operation::*;
    use Resource::*;

    match (resource, operation) {
        (Physician | Patient, GetAll) => ADMIN,
        (Physician | Patient, GetOne) => Requirement::AdminOrOwner,
        (Medicine, GetAll) => ADMIN_OR_USER,
        (Medicine, GetOne) => Requirement::AdminOrOwner,
        (MedicalSchool, GetAll | GetOne) => Requirement::Authenticated,
        (MedicalTraining | MedicalCertificate, GetAll | GetOne) => ADMIN_OR_USER,
        (Prescription, GetAll) => ADMIN,
        (Prescription, GetOne | Update) => ADMIN_OR_USER,
        (_, Create | Update | Delete) => ADMIN,
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,
}

/// Outcome of a policy check that did not reject outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Allowed only if the caller owns the addressed object
    NeedsOwnership,
}

/// Evaluate the table entry for `(resource, operation)` against `caller`.
pub fn evaluate(
    caller: Option<&Caller>,
    resource: Resource,
    operation: Operation,
) -> Result<Access, Rejection> {
    let caller = caller.ok_or(Rejection::Unauthenticated)?;

    match requirement(resource, operation) {
        Requirement::Authenticated => Ok(Access::Granted),
        Requirement::AnyOf(roles) => {
            if roles.iter().any(|role| caller.has_role(*role)) {
                Ok(Access::Granted)
            } else {
                Err(Rejection::Forbidden)
            }
        }
        Requirement::AdminOrOwner => {
            if caller.is_admin() {
                Ok(Access::Granted)
            } else if caller.has_role(Role::User) {
                Ok(Access::NeedsOwnership)
            } else {
                Err(Rejection::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn caller(roles: Vec<Role>) -> Caller {
        Caller {
            username: "someone".into(),
            roles,
            physician_id: Some(1),
        }
    }

    #[test]
    fn test_segments_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::from_segment(resource.segment()), Some(resource));
        }
        assert_eq!(Resource::from_segment("doctor"), None);
    }

    #[test]
    fn test_user_access() {
        let user = caller(vec![Role::User]);

        assert_eq!(
            evaluate(Some(&user), Resource::Physician, Operation::GetAll),
            Err(Rejection::Forbidden)
        );
        assert_eq!(
            evaluate(Some(&user), Resource::Physician, Operation::GetOne),
            Ok(Access::NeedsOwnership)
        );
        assert_eq!(
            evaluate(Some(&user), Resource::Medicine, Operation::GetAll),
            Ok(Access::Granted)
        );
        assert_eq!(
            evaluate(Some(&user), Resource::Prescription, Operation::Update),
            Ok(Access::Granted)
        );
        assert_eq!(
            evaluate(Some(&user), Resource::Prescription, Operation::Delete),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_school_reads_need_any_identity() {
        let nobody = caller(vec![]);
        assert_eq!(
            evaluate(Some(&nobody), Resource::MedicalSchool, Operation::GetAll),
            Ok(Access::Granted)
        );
        assert_eq!(
            evaluate(Some(&nobody), Resource::MedicalTraining, Operation::GetAll),
            Err(Rejection::Forbidden)
        );
    }

    fn any_resource() -> impl Strategy<Value = Resource> {
        prop::sample::select(Resource::ALL.to_vec())
    }

    fn any_operation() -> impl Strategy<Value = Operation> {
        prop::sample::select(Operation::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_anonymous_is_unauthenticated(resource in any_resource(), operation in any_operation()) {
            prop_assert_eq!(evaluate(None, resource, operation), Err(Rejection::Unauthenticated));
        }

        #[test]
        fn prop_admin_always_granted(resource in any_resource(), operation in any_operation()) {
            let admin = caller(vec![Role::Admin]);
            prop_assert_eq!(evaluate(Some(&admin), resource, operation), Ok(Access::Granted));
        }

        #[test]
        fn prop_user_never_mutates_outside_prescription_update(
            resource in any_resource(),
            operation in prop::sample::select(vec![Operation::Create, Operation::Update, Operation::Delete]),
        ) {
            let user = caller(vec![Role::User]);
            let allowed = resource == Resource::Prescription && operation == Operation::Update;
            prop_assert_eq!(evaluate(Some(&user), resource, operation).is_ok(), allowed);
        }
    }
}
