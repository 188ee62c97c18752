use async_trait::async_trait;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use common::prelude::{Department, DepartmentProvider};

use super::Database;

/// Department provider over SQLite. Each aggregate is one row; the
/// `doc` column carries the serialized tree and is rewritten in full
/// by `put`, so nested levels are never persisted independently.
#[derive(Debug, Clone)]
pub struct SqliteDepartmentProvider {
    db: Database,
}

#[derive(Debug, thiserror::Error)]
pub enum SqliteDepartmentProviderError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored department document is malformed: {0}")]
    MalformedDoc(#[from] serde_json::Error),
}

impl SqliteDepartmentProvider {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentProvider for SqliteDepartmentProvider {
    type Error = SqliteDepartmentProviderError;

    async fn list(&self) -> Result<Vec<Department>, Self::Error> {
        let rows = sqlx::query("SELECT doc FROM departments ORDER BY created_at ASC, rowid ASC")
            .fetch_all(&*self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                let doc: String = row.try_get("doc")?;
                Ok(serde_json::from_str(&doc)?)
            })
            .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Department>, Self::Error> {
        let row = sqlx::query("SELECT doc FROM departments WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&*self.db)
            .await?;

        match row {
            Some(row) => {
                let doc: String = row.try_get("doc")?;
                Ok(Some(serde_json::from_str(&doc)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, department: &Department) -> Result<(), Self::Error> {
        let doc = serde_json::to_string(department)?;
        let now = OffsetDateTime::now_utc().unix_timestamp();

        sqlx::query(
            r#"
            INSERT INTO departments (id, name, doc, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name, doc = excluded.doc
            "#,
        )
        .bind(department.id.to_string())
        .bind(&department.name)
        .bind(doc)
        .bind(now)
        .execute(&*self.db)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Self::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?1")
            .bind(id.to_string())
            .execute(&*self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::prelude::{ResourceKind, TreeManager};

    async fn manager() -> TreeManager<SqliteDepartmentProvider> {
        let db = Database::memory().await.unwrap();
        TreeManager::new(SqliteDepartmentProvider::new(db))
    }

    #[tokio::test]
    async fn test_aggregate_rewrite_roundtrip() {
        let manager = manager().await;

        let dep = manager.add_department("CS").await.unwrap();
        let year = manager.add_year(dep.id, 1).await.unwrap();
        let subject = manager.add_subject(dep.id, year.id, "Math").await.unwrap();
        manager
            .add_resource(
                dep.id,
                year.id,
                subject.id,
                "Syllabus",
                "http://x/y.pdf",
                ResourceKind::Pdf,
            )
            .await
            .unwrap();

        let departments = manager.list_departments(true).await.unwrap();
        assert_eq!(departments.len(), 1);
        let resource = &departments[0].years[0].subjects[0].resources[0];
        assert_eq!(resource.description, "Syllabus");
        assert_eq!(resource.kind, ResourceKind::Pdf);
    }

    #[tokio::test]
    async fn test_delete_department_removes_row() {
        let manager = manager().await;

        let dep = manager.add_department("CS").await.unwrap();
        manager.delete_department(dep.id).await.unwrap();

        assert!(manager.list_departments(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_departments_listed_in_creation_order() {
        let manager = manager().await;

        manager.add_department("Mechanical").await.unwrap();
        manager.add_department("CS").await.unwrap();

        let departments = manager.list_departments(false).await.unwrap();
        let names: Vec<&str> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Mechanical", "CS"]);
    }
}
