//! Project repository behaviour against a real database.

use super::helpers::{store_project, temporary_database};
use mockable::DefaultClock;
use rstest::rstest;
use task_tracker::project::{
    domain::{NewProject, ProjectDetails, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use task_tracker::storage;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schema_can_be_applied_again_without_losing_rows() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let projects = database.projects();
    let kept = store_project(&projects, "Kept").await;

    storage::apply_schema(database.pool())
        .await
        .expect("reapplying the schema succeeds");

    let found = projects.find_by_id(kept.id()).await.expect("lookup succeeds");
    assert_eq!(found, Some(kept));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_are_rejected_on_store_and_update() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let projects = database.projects();
    store_project(&projects, "Garden").await;
    let mut kitchen = store_project(&projects, "Kitchen").await;

    let duplicate = ProjectDetails::parse("Garden".to_owned(), None, None).expect("valid");
    let stored = projects
        .store(&NewProject::new(duplicate.clone(), &DefaultClock))
        .await;
    assert!(matches!(stored, Err(ProjectRepositoryError::DuplicateName(_))));

    kitchen.replace_details(duplicate, &DefaultClock);
    let updated = projects.update(&kitchen).await;
    assert!(matches!(updated, Err(ProjectRepositoryError::DuplicateName(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batched_lookup_skips_unknown_ids() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let projects = database.projects();
    let first = store_project(&projects, "First").await;
    let second = store_project(&projects, "Second").await;

    let mut found = projects
        .find_by_ids(&[second.id(), ProjectId::new(9_999), first.id()])
        .await
        .expect("lookup succeeds");
    found.sort_by_key(|project| project.id());

    assert_eq!(found, vec![first, second]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_all_orders_by_id_and_delete_is_checked() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let projects = database.projects();
    let zeta = store_project(&projects, "Zeta").await;
    let alpha = store_project(&projects, "Alpha").await;

    let names: Vec<_> = projects
        .list_all()
        .await
        .expect("listing succeeds")
        .iter()
        .map(|project| project.name().as_str().to_owned())
        .collect();
    assert_eq!(names, ["Zeta", "Alpha"]);

    projects.delete(zeta.id()).await.expect("delete succeeds");
    assert!(matches!(
        projects.delete(zeta.id()).await,
        Err(ProjectRepositoryError::NotFound(_))
    ));
    assert_eq!(projects.count().await.expect("count"), 1);
    assert_eq!(
        projects.find_by_id(alpha.id()).await.expect("lookup"),
        Some(alpha)
    );
}
