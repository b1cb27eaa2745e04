//! Physician operations and the USER account created alongside each one.

use super::{check_version, MedicalService, ServiceError, ServiceResult};
use crate::db::NamedQuery;
use crate::models::{derive_username, Physician, Role};
use crate::security::{hash_password, Caller};

impl MedicalService<'_> {
    pub fn all_physicians(&self) -> ServiceResult<Vec<Physician>> {
        tracing::debug!("all_physicians");
        Ok(self.db.get_all(NamedQuery::PhysicianFindAll)?)
    }

    pub fn physician_by_id(&self, id: i64) -> ServiceResult<Option<Physician>> {
        tracing::debug!(id, "physician_by_id");
        Ok(self.db.get_by_id(NamedQuery::PhysicianFindById, id)?)
    }

    /// Persist a physician together with its USER account
    /// (`{prefix}_{first}.{last}`, default password).
    pub fn create_physician(&self, physician: Physician) -> ServiceResult<Physician> {
        let username = derive_username(
            &self.config.user_prefix,
            &physician.first_name,
            &physician.last_name,
        );

        let id = self.db.unit_of_work(|db| -> ServiceResult<i64> {
            if db.security_user_by_username(&username)?.is_some() {
                return Err(ServiceError::Duplicate(format!(
                    "username {} already exists",
                    username
                )));
            }

            let fresh = Physician::new(physician.first_name.clone(), physician.last_name.clone());
            let id = db.insert_physician(&fresh)?;

            let phc = hash_password(
                &self.config.default_user_password,
                &self.config.password_hash,
            )?;
            db.insert_security_user(&username, &phc, Some(id), &[Role::User])?;
            Ok(id)
        })?;

        tracing::info!(id, %username, "physician created");
        self.physician_by_id(id)?
            .ok_or_else(|| ServiceError::Lookup(format!("physician {} vanished after insert", id)))
    }

    pub fn update_physician(
        &self,
        id: i64,
        changes: Physician,
    ) -> ServiceResult<Option<Physician>> {
        let updated = self.db.unit_of_work(|db| -> ServiceResult<bool> {
            let Some(mut current) = db.get_by_id::<Physician>(NamedQuery::PhysicianFindById, id)?
            else {
                return Ok(false);
            };
            check_version("physician", changes.version, current.version)?;

            current.first_name = changes.first_name;
            current.last_name = changes.last_name;
            Ok(db.update_physician(&current)?)
        })?;

        if !updated {
            tracing::warn!(id, "update of missing physician");
            return Ok(None);
        }
        tracing::info!(id, "physician updated");
        self.physician_by_id(id)
    }

    /// Whether `caller` is the USER linked to physician `id`.
    pub fn owns_physician(&self, caller: &Caller, id: i64) -> bool {
        caller.physician_id == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::security::verify_password;
    use crate::service::testing;

    #[test]
    fn test_create_builds_account() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        let created = service
            .create_physician(Physician::new("John123", "Doe123"))
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.version, 1);

        let user = db.security_user_by_username("user_John123.Doe123").unwrap().unwrap();
        assert_eq!(user.physician_id, Some(created.id));
        assert_eq!(user.roles, vec![Role::User]);
        assert!(verify_password("password", &user.password_hash).unwrap());
    }

    #[test]
    fn test_same_name_twice_is_duplicate() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);

        service.create_physician(Physician::new("A", "B")).unwrap();
        let second = service.create_physician(Physician::new("A", "B"));
        assert!(matches!(second, Err(ServiceError::Duplicate(_))));
        assert_eq!(service.all_physicians().unwrap().len(), 1);
    }

    #[test]
    fn test_update() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);
        let created = service.create_physician(Physician::new("A", "B")).unwrap();

        let mut changes = Physician::new("A", "C");
        changes.version = 0;
        let updated = service.update_physician(created.id, changes).unwrap().unwrap();
        assert_eq!(updated.last_name, "C");
        assert_eq!(updated.version, 2);

        assert!(service
            .update_physician(created.id + 1, Physician::new("X", "Y"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_stale_update_is_conflict() {
        let db = Database::open_in_memory().unwrap();
        let config = testing::config();
        let service = MedicalService::new(&db, &config);
        let created = service.create_physician(Physician::new("A", "B")).unwrap();

        let mut first = created.clone();
        first.first_name = "First".into();
        service.update_physician(created.id, first).unwrap();

        let mut stale = created.clone();
        stale.first_name = "Stale".into();
        let result = service.update_physician(created.id, stale);
        assert!(matches!(result, Err(ServiceError::Conflict(_))));

        let stored = service.physician_by_id(created.id).unwrap().unwrap();
        assert_eq!(stored.first_name, "First");
    }
}
