mod departments;
mod sessions;
mod users;

pub use departments::{SqliteDepartmentProvider, SqliteDepartmentProviderError};
pub use users::{SqliteUserProvider, SqliteUserProviderError};

use std::ops::Deref;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// The portal schema. Departments are stored one aggregate per row:
/// `doc` holds the serialized tree and is rewritten wholesale on
/// every nested mutation. Sessions are server-side so logout and
/// expiry are authoritative.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        doc TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL,
        expires_at INTEGER NOT NULL
    )
    "#,
];

#[derive(Clone, Debug)]
pub struct Database(SqlitePool);

impl Database {
    pub async fn connect(path: &Path) -> Result<Self, DatabaseSetupError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(DatabaseSetupError::Unavailable)?;

        let db = Database::new(pool);
        db.migrate().await?;
        Ok(db)
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub async fn memory() -> Result<Self, DatabaseSetupError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(DatabaseSetupError::Unavailable)?;

        let db = Database::new(pool);
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), DatabaseSetupError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.0)
                .await
                .map_err(DatabaseSetupError::MigrationFailed)?;
        }
        Ok(())
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("error occurred while attempting database migration: {0}")]
    MigrationFailed(sqlx::Error),

    #[error("unable to perform initial connection and check of the database: {0}")]
    Unavailable(sqlx::Error),
}
