use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use common::identity::{Role, User, UserProvider, UserProviderError};

use super::Database;

/// User provider over SQLite. Email uniqueness is enforced by the
/// UNIQUE constraint on the `email` column.
#[derive(Debug, Clone)]
pub struct SqliteUserProvider {
    db: Database,
}

#[derive(Debug, thiserror::Error)]
pub enum SqliteUserProviderError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored user record is malformed: {0}")]
    MalformedRecord(String),
}

impl SqliteUserProvider {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, SqliteUserProviderError> {
    let id: String = row.try_get("id").map_err(SqliteUserProviderError::from)?;
    let role: String = row.try_get("role").map_err(SqliteUserProviderError::from)?;

    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| SqliteUserProviderError::MalformedRecord(e.to_string()))?,
        email: row.try_get("email").map_err(SqliteUserProviderError::from)?,
        password_hash: row
            .try_get("password_hash")
            .map_err(SqliteUserProviderError::from)?,
        role: Role::from_str(&role).map_err(SqliteUserProviderError::MalformedRecord)?,
        name: row.try_get("name").map_err(SqliteUserProviderError::from)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl UserProvider for SqliteUserProvider {
    type Error = SqliteUserProviderError;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, UserProviderError<Self::Error>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, name FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&*self.db)
        .await
        .map_err(SqliteUserProviderError::from)?;

        match row {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, user: &User) -> Result<(), UserProviderError<Self::Error>> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, name)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.name)
        .execute(&*self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(UserProviderError::DuplicateEmail),
            Err(e) => Err(SqliteUserProviderError::from(e).into()),
        }
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, UserProviderError<Self::Error>> {
        let result = sqlx::query("DELETE FROM users WHERE email = ?1")
            .bind(email)
            .execute(&*self.db)
            .await
            .map_err(SqliteUserProviderError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserProviderError<Self::Error>> {
        let rows = sqlx::query(
            "SELECT id, email, password_hash, role, name FROM users WHERE role = ?1 ORDER BY email ASC",
        )
        .bind(role.as_str())
        .fetch_all(&*self.db)
        .await
        .map_err(SqliteUserProviderError::from)?;

        rows.iter()
            .map(|row| user_from_row(row).map_err(UserProviderError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::prelude::{IdentityError, IdentityService};

    async fn service() -> IdentityService<SqliteUserProvider> {
        let db = Database::memory().await.unwrap();
        IdentityService::new(SqliteUserProvider::new(db))
    }

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let service = service().await;
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        let session = service
            .authenticate("ada@campus.edu", "hunter2")
            .await
            .unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_unique_constraint_surfaces_as_duplicate_email() {
        let service = service().await;
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        let result = service
            .create_user("ada@campus.edu", "other", "Imposter", Role::Student)
            .await;
        assert!(matches!(result, Err(IdentityError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let service = service().await;
        let result = service.delete_user("ghost@campus.edu").await;
        assert!(matches!(result, Err(IdentityError::NotFound)));
    }
}
