//! Security user and role storage.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Role, SecurityUser};

impl Database {
    fn role_id(&self, role: Role) -> DbResult<i64> {
        self.conn
            .query_row(
                "SELECT id FROM security_role WHERE name = ?",
                [role.as_str()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DbError::NotFound(format!("role {}", role)))
    }

    fn roles_of(&self, user_id: i64) -> DbResult<Vec<Role>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.name FROM security_role r
            JOIN security_user_has_role ur ON ur.role_id = r.id
            WHERE ur.user_id = ?
            ORDER BY r.name
            "#,
        )?;
        let names = stmt
            .query_map([user_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        names
            .into_iter()
            .map(|name| name.parse::<Role>().map_err(DbError::Constraint))
            .collect()
    }

    fn load_user(
        &self,
        where_clause: &str,
        param: &dyn rusqlite::ToSql,
    ) -> DbResult<Option<SecurityUser>> {
        let sql = format!(
            "SELECT id, username, password_hash, physician_id FROM security_user WHERE {}",
            where_clause
        );
        let found = self
            .conn
            .query_row(&sql, &[param], |row| {
                Ok(SecurityUser {
                    id: row.get("id")?,
                    username: row.get("username")?,
                    password_hash: row.get("password_hash")?,
                    physician_id: row.get("physician_id")?,
                    roles: Vec::new(),
                })
            })
            .optional()?;

        match found {
            Some(mut user) => {
                user.roles = self.roles_of(user.id)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Insert an account with the given roles, returning its id.
    pub fn insert_security_user(
        &self,
        username: &str,
        password_hash: &str,
        physician_id: Option<i64>,
        roles: &[Role],
    ) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO security_user (username, password_hash, physician_id) VALUES (?1, ?2, ?3)",
            params![username, password_hash, physician_id],
        )?;
        let user_id = self.conn.last_insert_rowid();

        for role in roles {
            let role_id = self.role_id(*role)?;
            self.conn.execute(
                "INSERT OR IGNORE INTO security_user_has_role (user_id, role_id) VALUES (?1, ?2)",
                params![user_id, role_id],
            )?;
        }
        Ok(user_id)
    }

    pub fn security_user_by_username(&self, username: &str) -> DbResult<Option<SecurityUser>> {
        self.load_user("username = ?", &username)
    }

    /// The account linked to a physician, if any.
    pub fn security_user_for_physician(&self, physician_id: i64) -> DbResult<Option<SecurityUser>> {
        self.load_user("physician_id = ?", &physician_id)
    }

    pub fn delete_security_user(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM security_user WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Physician;

    #[test]
    fn test_insert_and_lookup() {
        let db = Database::open_in_memory().unwrap();
        let physician_id = db.insert_physician(&Physician::new("John", "Doe")).unwrap();
        let id = db
            .insert_security_user("user_John.Doe", "hash", Some(physician_id), &[Role::User])
            .unwrap();

        let by_name = db.security_user_by_username("user_John.Doe").unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.roles, vec![Role::User]);
        assert_eq!(by_name.physician_id, Some(physician_id));

        let by_physician = db.security_user_for_physician(physician_id).unwrap().unwrap();
        assert_eq!(by_physician.username, "user_John.Doe");
    }

    #[test]
    fn test_multiple_roles() {
        let db = Database::open_in_memory().unwrap();
        db.insert_security_user("root", "hash", None, &[Role::Admin, Role::User])
            .unwrap();
        let user = db.security_user_by_username("root").unwrap().unwrap();
        assert!(user.has_role(Role::Admin));
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn test_username_unique() {
        let db = Database::open_in_memory().unwrap();
        db.insert_security_user("admin", "h", None, &[Role::Admin]).unwrap();
        assert!(db.insert_security_user("admin", "h", None, &[Role::Admin]).is_err());
    }

    #[test]
    fn test_delete_unblocks_physician() {
        let db = Database::open_in_memory().unwrap();
        let physician_id = db.insert_physician(&Physician::new("A", "B")).unwrap();
        let user_id = db
            .insert_security_user("u", "h", Some(physician_id), &[Role::User])
            .unwrap();

        assert!(db.delete_physician(physician_id).is_err());
        assert!(db.delete_security_user(user_id).unwrap());
        assert!(db.delete_physician(physician_id).unwrap());
        assert!(db.security_user_by_username("u").unwrap().is_none());
    }
}
