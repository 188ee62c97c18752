use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::provider::{UserProvider, UserProviderError};
use super::{Role, User};

/// In-memory user provider keyed by email, for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserProvider {
    inner: Arc<RwLock<HashMap<String, User>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryUserProviderError {
    #[error("memory provider error: {0}")]
    Internal(String),
}

impl MemoryUserProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProvider for MemoryUserProvider {
    type Error = MemoryUserProviderError;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, UserProviderError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            UserProviderError::Other(MemoryUserProviderError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        Ok(inner.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserProviderError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            UserProviderError::Other(MemoryUserProviderError::Internal(format!(
                "failed to acquire write lock: {}",
                e
            )))
        })?;

        if inner.contains_key(&user.email) {
            return Err(UserProviderError::DuplicateEmail);
        }

        inner.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, UserProviderError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            UserProviderError::Other(MemoryUserProviderError::Internal(format!(
                "failed to acquire write lock: {}",
                e
            )))
        })?;

        Ok(inner.remove(email).is_some())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserProviderError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            UserProviderError::Other(MemoryUserProviderError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        let mut users: Vec<User> = inner.values().filter(|u| u.role == role).cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}
