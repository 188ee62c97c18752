use uuid::Uuid;

use super::password::{hash_password, verify_password, PasswordError};
use super::provider::{UserProvider, UserProviderError};
use super::{Role, SessionUser, User};

#[derive(thiserror::Error, Debug)]
pub enum IdentityError<T> {
    /// Unknown email and wrong password collapse into the same
    /// variant so login responses cannot be used to enumerate
    /// registered accounts.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("user not found")]
    NotFound,
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("unhandled user provider error: {0}")]
    Provider(T),
}

impl<T> From<UserProviderError<T>> for IdentityError<T> {
    fn from(err: UserProviderError<T>) -> Self {
        match err {
            UserProviderError::DuplicateEmail => Self::DuplicateEmail,
            UserProviderError::Other(e) => Self::Provider(e),
        }
    }
}

/// Authentication and user administration over a pluggable user
/// provider.
#[derive(Debug, Clone)]
pub struct IdentityService<P: UserProvider> {
    provider: P,
}

impl<P: UserProvider> IdentityService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Check credentials and return the session view of the user.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, IdentityError<P::Error>> {
        let user = match self.provider.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email, "login attempt for unknown email");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(email, "login attempt with wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(SessionUser::from(&user))
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<User, IdentityError<P::Error>> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(IdentityError::Validation(
                "email, password and name are required".to_string(),
            ));
        }

        if self.provider.find_by_email(email).await?.is_some() {
            return Err(IdentityError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role,
            name: name.to_string(),
        };
        self.provider.insert(&user).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, email: &str) -> Result<(), IdentityError<P::Error>> {
        let deleted = self.provider.delete_by_email(email).await?;
        if !deleted {
            return Err(IdentityError::NotFound);
        }
        Ok(())
    }

    /// Registered students, for the admin management page.
    pub async fn students(&self) -> Result<Vec<User>, IdentityError<P::Error>> {
        Ok(self.provider.list_by_role(Role::Student).await?)
    }

    /// Registered admins, shown as faculty in the admin UI.
    pub async fn faculty(&self) -> Result<Vec<User>, IdentityError<P::Error>> {
        Ok(self.provider.list_by_role(Role::Admin).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::MemoryUserProvider;
    use super::*;

    fn service() -> IdentityService<MemoryUserProvider> {
        IdentityService::new(MemoryUserProvider::new())
    }

    #[tokio::test]
    async fn test_authenticate_roundtrip() {
        let service = service();
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        let session = service
            .authenticate("ada@campus.edu", "hunter2")
            .await
            .unwrap();
        assert_eq!(session.email, "ada@campus.edu");
        assert_eq!(session.name, "Ada");
        assert_eq!(session.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_fail_alike() {
        let service = service();
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        let wrong_password = service.authenticate("ada@campus.edu", "nope").await;
        assert!(matches!(
            wrong_password,
            Err(IdentityError::InvalidCredentials)
        ));

        let unknown = service.authenticate("ghost@campus.edu", "nope").await;
        assert!(matches!(unknown, Err(IdentityError::InvalidCredentials)));

        // Same message either way
        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            unknown.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_original_intact() {
        let service = service();
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        let result = service
            .create_user("ada@campus.edu", "other", "Imposter", Role::Student)
            .await;
        assert!(matches!(result, Err(IdentityError::DuplicateEmail)));

        // Original credentials still work, original name preserved
        let session = service
            .authenticate("ada@campus.edu", "hunter2")
            .await
            .unwrap();
        assert_eq!(session.name, "Ada");
    }

    #[tokio::test]
    async fn test_create_user_requires_all_fields() {
        let service = service();
        let result = service.create_user("", "pw", "Ada", Role::Admin).await;
        assert!(matches!(result, Err(IdentityError::Validation(_))));

        let result = service
            .create_user("ada@campus.edu", "", "Ada", Role::Admin)
            .await;
        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = service();
        service
            .create_user("ada@campus.edu", "hunter2", "Ada", Role::Admin)
            .await
            .unwrap();

        service.delete_user("ada@campus.edu").await.unwrap();

        let result = service.delete_user("ada@campus.edu").await;
        assert!(matches!(result, Err(IdentityError::NotFound)));
    }

    #[tokio::test]
    async fn test_listing_splits_by_role() {
        let service = service();
        service
            .create_user("ada@campus.edu", "pw", "Ada", Role::Admin)
            .await
            .unwrap();
        service
            .create_user("stu@campus.edu", "pw", "Stu", Role::Student)
            .await
            .unwrap();

        let students = service.students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].email, "stu@campus.edu");

        let faculty = service.faculty().await.unwrap();
        assert_eq!(faculty.len(), 1);
        assert_eq!(faculty[0].email, "ada@campus.edu");
    }
}
