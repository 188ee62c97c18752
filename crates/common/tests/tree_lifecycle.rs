//! End-to-end walk over the content tree: build a realistic
//! department, browse it, then tear it down piece by piece.

use common::prelude::*;
use common::tree::memory::MemoryDepartmentProvider;

fn manager() -> TreeManager<MemoryDepartmentProvider> {
    TreeManager::new(MemoryDepartmentProvider::new())
}

#[tokio::test]
async fn test_build_browse_and_teardown() {
    let tree = manager();

    let cs = tree.add_department("Computer Science").await.unwrap();
    let math = tree.add_department("Mathematics").await.unwrap();

    let year1 = tree.add_year(cs.id, 1).await.unwrap();
    let year2 = tree.add_year(cs.id, 2).await.unwrap();

    let algorithms = tree.add_subject(cs.id, year1.id, "Algorithms").await.unwrap();
    tree.add_subject(cs.id, year2.id, "Operating Systems")
        .await
        .unwrap();

    let notes = tree
        .add_resource(
            cs.id,
            year1.id,
            algorithms.id,
            "Lecture notes",
            "https://example.edu/algo.pdf",
            ResourceKind::Pdf,
        )
        .await
        .unwrap();
    tree.add_resource(
        cs.id,
        year1.id,
        algorithms.id,
        "Recorded lectures",
        "https://example.edu/algo-videos",
        ResourceKind::Video,
    )
    .await
    .unwrap();

    // The populated listing carries the whole nested structure.
    let listing = tree.list_departments(true).await.unwrap();
    assert_eq!(listing.len(), 2);
    let loaded_cs = listing.iter().find(|d| d.id == cs.id).unwrap();
    assert_eq!(loaded_cs.years.len(), 2);
    let loaded_year1 = loaded_cs.year(year1.id).unwrap();
    assert_eq!(loaded_year1.subjects.len(), 1);
    assert_eq!(loaded_year1.subjects[0].resources.len(), 2);

    // Tear down bottom-up; siblings survive each removal.
    tree.delete_resource(cs.id, year1.id, algorithms.id, notes.id)
        .await
        .unwrap();
    let reloaded = tree.get_department(cs.id).await.unwrap();
    assert_eq!(
        reloaded.year(year1.id).unwrap().subjects[0].resources.len(),
        1
    );

    tree.delete_subject(cs.id, year1.id, algorithms.id)
        .await
        .unwrap();
    tree.delete_year(cs.id, year1.id).await.unwrap();
    let reloaded = tree.get_department(cs.id).await.unwrap();
    assert_eq!(reloaded.years.len(), 1);
    assert_eq!(reloaded.years[0].id, year2.id);

    tree.delete_department(cs.id).await.unwrap();
    let listing = tree.list_departments(true).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, math.id);
}

#[tokio::test]
async fn test_department_aggregate_roundtrips_through_json() {
    let tree = manager();

    let dep = tree.add_department("Physics").await.unwrap();
    let year = tree.add_year(dep.id, 1).await.unwrap();
    let subject = tree.add_subject(dep.id, year.id, "Mechanics").await.unwrap();
    tree.add_resource(
        dep.id,
        year.id,
        subject.id,
        "Problem sets",
        "https://example.edu/mechanics",
        ResourceKind::Link,
    )
    .await
    .unwrap();

    // Providers persist the aggregate as one JSON document; the
    // serialized form has to carry everything needed to rebuild it.
    let loaded = tree.get_department(dep.id).await.unwrap();
    let doc = serde_json::to_string(&loaded).unwrap();
    let restored: Department = serde_json::from_str(&doc).unwrap();
    assert_eq!(restored, loaded);
}

#[tokio::test]
async fn test_missing_ancestors_are_reported_top_down() {
    let tree = manager();

    let dep = tree.add_department("History").await.unwrap();
    let year = tree.add_year(dep.id, 1).await.unwrap();

    let bogus = uuid::Uuid::new_v4();

    // Unknown department wins over the unknown year below it.
    let err = tree.delete_year(bogus, year.id).await.unwrap_err();
    assert!(matches!(err, TreeError::NotFound(TreeLevel::Department)));

    let err = tree
        .delete_subject(dep.id, bogus, bogus)
        .await
        .unwrap_err();
    assert!(matches!(err, TreeError::NotFound(TreeLevel::Year)));

    let err = tree
        .delete_resource(dep.id, year.id, bogus, bogus)
        .await
        .unwrap_err();
    assert!(matches!(err, TreeError::NotFound(TreeLevel::Subject)));
}
