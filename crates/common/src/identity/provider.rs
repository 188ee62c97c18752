use std::fmt::{Debug, Display};

use async_trait::async_trait;

use super::{Role, User};

/// Provider-level failures the identity service cares about.
/// Anything else travels through `Other`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserProviderError<T> {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("unhandled user provider error: {0}")]
    Other(#[from] T),
}

/// Storage for user records. Email uniqueness is enforced here,
/// at the store level.
#[async_trait]
pub trait UserProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync;

    async fn find_by_email(&self, email: &str)
        -> Result<Option<User>, UserProviderError<Self::Error>>;

    /// Insert a new user. Fails with `DuplicateEmail` when the email
    /// is already registered.
    async fn insert(&self, user: &User) -> Result<(), UserProviderError<Self::Error>>;

    /// Delete by email. Returns `false` when nothing matched.
    async fn delete_by_email(&self, email: &str) -> Result<bool, UserProviderError<Self::Error>>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserProviderError<Self::Error>>;
}
