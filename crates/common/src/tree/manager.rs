use uuid::Uuid;

use super::provider::{DepartmentProvider, TreeError, TreeLevel};
use super::{Department, Resource, ResourceKind, Subject, Year};

/// Business logic over the content tree. Every mutation below the
/// department level fetches the aggregate, edits it in memory and
/// rewrites the whole document through the provider; a failed write
/// simply discards the in-memory change.
///
/// Concurrent edits to different departments are independent.
/// Concurrent edits to the same department are last-write-wins,
/// which is acceptable for a human-paced administrative workload.
#[derive(Debug, Clone)]
pub struct TreeManager<P: DepartmentProvider> {
    provider: P,
}

impl<P: DepartmentProvider> TreeManager<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Create a department. The name is trimmed; an empty or
    /// whitespace-only name is rejected.
    pub async fn add_department(&self, name: &str) -> Result<Department, TreeError<P::Error>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TreeError::Validation(
                "department name must not be empty".to_string(),
            ));
        }

        let department = Department::new(name.to_string());
        self.provider.put(&department).await?;
        Ok(department)
    }

    /// Append a year to a department. Duplicate year numbers are
    /// permitted.
    pub async fn add_year(&self, dep_id: Uuid, year: u32) -> Result<Year, TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;

        let new_year = Year::new(year);
        department.years.push(new_year.clone());
        self.provider.put(&department).await?;
        Ok(new_year)
    }

    pub async fn add_subject(
        &self,
        dep_id: Uuid,
        year_id: Uuid,
        name: &str,
    ) -> Result<Subject, TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;
        let year = department
            .year_mut(year_id)
            .ok_or(TreeError::NotFound(TreeLevel::Year))?;

        let subject = Subject::new(name.to_string());
        year.subjects.push(subject.clone());
        self.provider.put(&department).await?;
        Ok(subject)
    }

    pub async fn add_resource(
        &self,
        dep_id: Uuid,
        year_id: Uuid,
        subject_id: Uuid,
        description: &str,
        link: &str,
        kind: ResourceKind,
    ) -> Result<Resource, TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;
        let year = department
            .year_mut(year_id)
            .ok_or(TreeError::NotFound(TreeLevel::Year))?;
        let subject = year
            .subject_mut(subject_id)
            .ok_or(TreeError::NotFound(TreeLevel::Subject))?;

        let resource = Resource::new(description.to_string(), link.to_string(), kind);
        subject.resources.push(resource.clone());
        self.provider.put(&department).await?;
        Ok(resource)
    }

    /// Remove a department and, because the tree is embedded, every
    /// year, subject and resource under it.
    pub async fn delete_department(&self, dep_id: Uuid) -> Result<(), TreeError<P::Error>> {
        let deleted = self.provider.delete(dep_id).await?;
        if !deleted {
            return Err(TreeError::NotFound(TreeLevel::Department));
        }
        Ok(())
    }

    pub async fn delete_year(
        &self,
        dep_id: Uuid,
        year_id: Uuid,
    ) -> Result<(), TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;

        let before = department.years.len();
        department.years.retain(|y| y.id != year_id);
        if department.years.len() == before {
            return Err(TreeError::NotFound(TreeLevel::Year));
        }

        self.provider.put(&department).await?;
        Ok(())
    }

    pub async fn delete_subject(
        &self,
        dep_id: Uuid,
        year_id: Uuid,
        subject_id: Uuid,
    ) -> Result<(), TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;
        let year = department
            .year_mut(year_id)
            .ok_or(TreeError::NotFound(TreeLevel::Year))?;

        let before = year.subjects.len();
        year.subjects.retain(|s| s.id != subject_id);
        if year.subjects.len() == before {
            return Err(TreeError::NotFound(TreeLevel::Subject));
        }

        self.provider.put(&department).await?;
        Ok(())
    }

    pub async fn delete_resource(
        &self,
        dep_id: Uuid,
        year_id: Uuid,
        subject_id: Uuid,
        resource_id: Uuid,
    ) -> Result<(), TreeError<P::Error>> {
        let mut department = self.fetch(dep_id).await?;
        let year = department
            .year_mut(year_id)
            .ok_or(TreeError::NotFound(TreeLevel::Year))?;
        let subject = year
            .subject_mut(subject_id)
            .ok_or(TreeError::NotFound(TreeLevel::Subject))?;

        let before = subject.resources.len();
        subject.resources.retain(|r| r.id != resource_id);
        if subject.resources.len() == before {
            return Err(TreeError::NotFound(TreeLevel::Resource));
        }

        self.provider.put(&department).await?;
        Ok(())
    }

    /// List departments. With `populate` the full nested tree is
    /// returned; without it only the department shells, for the
    /// admin summary view.
    pub async fn list_departments(
        &self,
        populate: bool,
    ) -> Result<Vec<Department>, TreeError<P::Error>> {
        let mut departments = self.provider.list().await?;
        if !populate {
            for department in &mut departments {
                department.years.clear();
            }
        }
        Ok(departments)
    }

    pub async fn get_department(
        &self,
        dep_id: Uuid,
    ) -> Result<Department, TreeError<P::Error>> {
        self.fetch(dep_id).await
    }

    async fn fetch(&self, dep_id: Uuid) -> Result<Department, TreeError<P::Error>> {
        self.provider
            .get(dep_id)
            .await?
            .ok_or(TreeError::NotFound(TreeLevel::Department))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::MemoryDepartmentProvider;
    use super::*;

    fn manager() -> TreeManager<MemoryDepartmentProvider> {
        TreeManager::new(MemoryDepartmentProvider::new())
    }

    #[tokio::test]
    async fn test_add_department_trims_name() {
        let manager = manager();
        let department = manager.add_department(" Physics ").await.unwrap();
        assert_eq!(department.name, "Physics");

        let listed = manager.list_departments(true).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Physics");
    }

    #[tokio::test]
    async fn test_add_department_rejects_empty_name() {
        let manager = manager();

        let result = manager.add_department("").await;
        assert!(matches!(result, Err(TreeError::Validation(_))));

        let result = manager.add_department("   ").await;
        assert!(matches!(result, Err(TreeError::Validation(_))));

        assert!(manager.list_departments(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_year_unknown_department() {
        let manager = manager();
        let result = manager.add_year(Uuid::new_v4(), 1).await;
        assert!(matches!(
            result,
            Err(TreeError::NotFound(TreeLevel::Department))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_year_numbers_permitted() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();

        manager.add_year(dep.id, 1).await.unwrap();
        manager.add_year(dep.id, 1).await.unwrap();

        let dep = manager.get_department(dep.id).await.unwrap();
        assert_eq!(dep.years.len(), 2);
    }

    #[tokio::test]
    async fn test_add_resource_then_list_populated() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();
        let year = manager.add_year(dep.id, 1).await.unwrap();
        let subject = manager.add_subject(dep.id, year.id, "Math").await.unwrap();

        let resource = manager
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
        let stored = &departments[0].years[0].subjects[0].resources[0];
        assert_eq!(stored.id, resource.id);
        assert_eq!(stored.description, "Syllabus");
        assert_eq!(stored.link, "http://x/y.pdf");
        assert_eq!(stored.kind, ResourceKind::Pdf);
    }

    #[tokio::test]
    async fn test_unpopulated_listing_strips_years() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();
        manager.add_year(dep.id, 1).await.unwrap();

        let summary = manager.list_departments(false).await.unwrap();
        assert!(summary[0].years.is_empty());

        let full = manager.list_departments(true).await.unwrap();
        assert_eq!(full[0].years.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_department_cascades() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();
        let year = manager.add_year(dep.id, 1).await.unwrap();
        manager.add_subject(dep.id, year.id, "Math").await.unwrap();

        manager.delete_department(dep.id).await.unwrap();

        assert!(manager.list_departments(true).await.unwrap().is_empty());
        let result = manager.get_department(dep.id).await;
        assert!(matches!(
            result,
            Err(TreeError::NotFound(TreeLevel::Department))
        ));
    }

    #[tokio::test]
    async fn test_delete_subject_leaves_siblings() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();
        let year = manager.add_year(dep.id, 1).await.unwrap();
        let math = manager.add_subject(dep.id, year.id, "Math").await.unwrap();
        let physics = manager
            .add_subject(dep.id, year.id, "Physics")
            .await
            .unwrap();

        manager.delete_subject(dep.id, year.id, math.id).await.unwrap();

        let dep = manager.get_department(dep.id).await.unwrap();
        assert_eq!(dep.years.len(), 1);
        assert_eq!(dep.years[0].subjects.len(), 1);
        assert_eq!(dep.years[0].subjects[0].id, physics.id);
    }

    #[tokio::test]
    async fn test_delete_year_removes_nested_content() {
        let manager = manager();
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

        manager.delete_year(dep.id, year.id).await.unwrap();

        let dep = manager.get_department(dep.id).await.unwrap();
        assert!(dep.years.is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_first_missing_level() {
        let manager = manager();
        let dep = manager.add_department("CS").await.unwrap();
        let year = manager.add_year(dep.id, 1).await.unwrap();

        let result = manager
            .delete_resource(Uuid::new_v4(), year.id, Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert!(matches!(
            result,
            Err(TreeError::NotFound(TreeLevel::Department))
        ));

        let result = manager
            .delete_resource(dep.id, Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(TreeError::NotFound(TreeLevel::Year))));

        let result = manager
            .delete_resource(dep.id, year.id, Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert!(matches!(
            result,
            Err(TreeError::NotFound(TreeLevel::Subject))
        ));
    }

    #[tokio::test]
    async fn test_resource_kind_falls_back_to_link() {
        assert_eq!(ResourceKind::parse_or_link("pdf"), ResourceKind::Pdf);
        assert_eq!(ResourceKind::parse_or_link("video"), ResourceKind::Video);
        assert_eq!(ResourceKind::parse_or_link("image"), ResourceKind::Image);
        assert_eq!(ResourceKind::parse_or_link("link"), ResourceKind::Link);
        assert_eq!(ResourceKind::parse_or_link("podcast"), ResourceKind::Link);
        assert_eq!(ResourceKind::parse_or_link(""), ResourceKind::Link);
    }
}
