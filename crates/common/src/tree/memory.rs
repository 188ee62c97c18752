use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::provider::DepartmentProvider;
use super::Department;

/// In-memory department provider using a HashMap, for tests and
/// small deployments that do not need a database. Each aggregate
/// carries the sequence number it was first inserted with, so the
/// listing keeps creation order across rewrites.
#[derive(Debug, Clone, Default)]
pub struct MemoryDepartmentProvider {
    inner: Arc<RwLock<HashMap<Uuid, (u64, Department)>>>,
    next_seq: Arc<AtomicU64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryDepartmentProviderError {
    #[error("memory provider error: {0}")]
    Internal(String),
}

impl MemoryDepartmentProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentProvider for MemoryDepartmentProvider {
    type Error = MemoryDepartmentProviderError;

    async fn list(&self) -> Result<Vec<Department>, Self::Error> {
        let inner = self.inner.read().map_err(|e| {
            MemoryDepartmentProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<(u64, Department)> = inner.values().cloned().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, d)| d).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Department>, Self::Error> {
        let inner = self.inner.read().map_err(|e| {
            MemoryDepartmentProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        Ok(inner.get(&id).map(|(_, d)| d.clone()))
    }

    async fn put(&self, department: &Department) -> Result<(), Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryDepartmentProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        let seq = match inner.get(&department.id) {
            Some((seq, _)) => *seq,
            None => self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        inner.insert(department.id, (seq, department.clone()));
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryDepartmentProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        Ok(inner.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let provider = MemoryDepartmentProvider::new();

        let mech = Department::new("Mechanical".to_string());
        let cs = Department::new("CS".to_string());
        provider.put(&mech).await.unwrap();
        provider.put(&cs).await.unwrap();

        let names: Vec<String> = provider
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Mechanical", "CS"]);
    }

    #[tokio::test]
    async fn test_rewrite_does_not_move_the_aggregate() {
        let provider = MemoryDepartmentProvider::new();

        let mut mech = Department::new("Mechanical".to_string());
        let cs = Department::new("CS".to_string());
        provider.put(&mech).await.unwrap();
        provider.put(&cs).await.unwrap();

        mech.years.push(super::super::Year::new(1));
        provider.put(&mech).await.unwrap();

        let listed = provider.list().await.unwrap();
        assert_eq!(listed[0].id, mech.id);
        assert_eq!(listed[0].years.len(), 1);
        assert_eq!(listed[1].id, cs.id);
    }
}
