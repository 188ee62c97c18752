use std::fmt::{Debug, Display};

use async_trait::async_trait;
use uuid::Uuid;

use super::Department;

/// Which level of the tree failed to resolve. Delete operations
/// walk the ancestor chain top-down and report the first missing
/// link, so callers can name the level in their 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLevel {
    Department,
    Year,
    Subject,
    Resource,
}

impl std::fmt::Display for TreeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Department => "Department",
            Self::Year => "Year",
            Self::Subject => "Subject",
            Self::Resource => "Resource",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError<T> {
    #[error("unhandled department provider error: {0}")]
    Provider(#[from] T),
    #[error("{0} not found")]
    NotFound(TreeLevel),
    #[error("invalid input: {0}")]
    Validation(String),
}

/// Storage for department aggregates. `put` performs an insert or a
/// full rewrite of the document; there is no partial persistence of
/// nested levels.
#[async_trait]
pub trait DepartmentProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync;

    /// List all department aggregates in creation order. Rewriting
    /// an aggregate does not move it in the listing.
    async fn list(&self) -> Result<Vec<Department>, Self::Error>;

    /// Fetch one aggregate by id, `None` when absent.
    async fn get(&self, id: Uuid) -> Result<Option<Department>, Self::Error>;

    /// Insert or rewrite the whole aggregate.
    async fn put(&self, department: &Department) -> Result<(), Self::Error>;

    /// Remove the aggregate. Returns `false` when nothing matched.
    async fn delete(&self, id: Uuid) -> Result<bool, Self::Error>;
}
