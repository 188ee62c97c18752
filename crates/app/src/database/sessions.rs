use std::str::FromStr;

use sqlx::Row;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use common::identity::{Role, SessionUser};

use super::Database;

/// Server-side session records. The cookie only carries the opaque
/// token; the user slice and the expiry live here, so logout and
/// expiry are authoritative.
impl Database {
    /// Create a session for an authenticated user, returning the
    /// opaque token. Expired sessions are purged on the way in.
    pub async fn create_session(
        &self,
        user: &SessionUser,
        ttl: Duration,
    ) -> Result<String, sqlx::Error> {
        let now = OffsetDateTime::now_utc();

        sqlx::query("DELETE FROM sessions WHERE expires_at < ?1")
            .bind(now.unix_timestamp())
            .execute(&**self)
            .await?;

        let token = Uuid::new_v4().to_string();
        let expires_at = (now + ttl).unix_timestamp();

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, name, email, role, expires_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&token)
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(expires_at)
        .execute(&**self)
        .await?;

        Ok(token)
    }

    /// Resolve a token to its session user. Expired sessions are
    /// deleted and treated as absent.
    pub async fn session_user(&self, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT user_id, name, email, role, expires_at FROM sessions WHERE token = ?1",
        )
        .bind(token)
        .fetch_optional(&**self)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at: i64 = row.try_get("expires_at")?;
        if expires_at < OffsetDateTime::now_utc().unix_timestamp() {
            self.delete_session(token).await?;
            return Ok(None);
        }

        let user_id: String = row.try_get("user_id")?;
        let role: String = row.try_get("role")?;

        // A row that cannot be decoded is treated as no session
        let (Ok(id), Ok(role)) = (Uuid::parse_str(&user_id), Role::from_str(&role)) else {
            tracing::warn!(token, "dropping malformed session record");
            self.delete_session(token).await?;
            return Ok(None);
        };

        Ok(Some(SessionUser {
            id,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role,
        }))
    }

    pub async fn delete_session(&self, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(&**self)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@campus.edu".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let db = Database::memory().await.unwrap();

        let token = db.create_session(&user(), Duration::hours(2)).await.unwrap();
        let session = db.session_user(&token).await.unwrap().unwrap();
        assert_eq!(session.email, "ada@campus.edu");
        assert_eq!(session.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let db = Database::memory().await.unwrap();

        let token = db.create_session(&user(), Duration::hours(2)).await.unwrap();
        db.delete_session(&token).await.unwrap();
        assert!(db.session_user(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let db = Database::memory().await.unwrap();

        let token = db
            .create_session(&user(), Duration::seconds(-1))
            .await
            .unwrap();
        assert!(db.session_user(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_absent() {
        let db = Database::memory().await.unwrap();
        assert!(db.session_user("nope").await.unwrap().is_none());
    }
}
