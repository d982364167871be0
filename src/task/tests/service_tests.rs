//! Service orchestration tests over the in-memory repositories.

use std::sync::Arc;

use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{NewProject, Project, ProjectDetails, ProjectId},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{
        CreateTaskRequest, TaskListQuery, TaskResponse, TaskService, TaskServiceError,
        UpdateTaskRequest,
    },
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    projects: Arc<InMemoryProjectRepository>,
}

impl Harness {
    async fn project(&self, name: &str) -> Project {
        let details = ProjectDetails::parse(name.to_owned(), None, None).expect("valid project");
        self.projects
            .store(&NewProject::new(details, &DefaultClock))
            .await
            .expect("project stored")
    }

    async fn task(&self, request: CreateTaskRequest) -> TaskResponse {
        self.service.create(request).await.expect("task created")
    }
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::with_task_references(
        tasks.as_ref().clone(),
    ));
    let service = TaskService::new(
        Arc::clone(&tasks),
        Arc::clone(&projects),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        tasks,
        projects,
    }
}

fn due(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, day).expect("valid date")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_applies_defaults_and_resolves_project(harness: Harness) {
    let project = harness.project("Home").await;

    let created = harness
        .task(
            CreateTaskRequest::new("  Paint fence ")
                .with_description("Use the green paint")
                .with_project_id(project.id()),
        )
        .await;

    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Paint fence");
    assert_eq!(created.status, TaskStatus::Open);
    assert_eq!(created.priority, TaskPriority::Medium);
    assert_eq!(created.project_id, Some(project.id().into_inner()));
    assert_eq!(created.project_name.as_deref(), Some("Home"));
    assert_eq!(created.created_at, created.updated_at);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_project_without_storing(harness: Harness) {
    let request = CreateTaskRequest::new("Orphan").with_project_id(ProjectId::new(42));

    let result = harness.service.create(request).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::ProjectNotFound(id)) if id == ProjectId::new(42)
    ));
    assert_eq!(harness.tasks.count().await.expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title(harness: Harness) {
    let result = harness.service.create(CreateTaskRequest::new("   ")).await;

    let Err(TaskServiceError::Validation(violations)) = result else {
        panic!("expected a validation failure");
    };
    assert_eq!(violations.get("title"), Some("must not be blank"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_returns_not_found_for_unknown_id(harness: Harness) {
    let result = harness.service.get(TaskId::new(999)).await;

    let err = result.expect_err("task does not exist");
    assert_eq!(err.to_string(), "Task with id 999 not found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_checks_existence_before_validating(harness: Harness) {
    let result = harness
        .service
        .update(TaskId::new(5), UpdateTaskRequest::new(""))
        .await;

    assert!(matches!(result, Err(TaskServiceError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_status_priority_and_clears_the_rest(harness: Harness) {
    let project = harness.project("Work").await;
    let created = harness
        .task(
            CreateTaskRequest::new("Ship release")
                .with_description("Tag and publish")
                .with_status(TaskStatus::InProgress)
                .with_priority(TaskPriority::High)
                .with_due_date(due(20))
                .with_project_id(project.id()),
        )
        .await;

    let updated = harness
        .service
        .update(
            TaskId::new(created.id),
            UpdateTaskRequest::new("Ship release 1.0"),
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.title, "Ship release 1.0");
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.description, None);
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.project_id, None);
    assert_eq!(updated.project_name, None);
    assert!(updated.updated_at >= updated.created_at);

    let fetched = harness
        .service
        .get(TaskId::new(created.id))
        .await
        .expect("task exists");
    assert_eq!(fetched, updated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_unknown_project_leaves_task_untouched(harness: Harness) {
    let created = harness.task(CreateTaskRequest::new("Stable")).await;

    let result = harness
        .service
        .update(
            TaskId::new(created.id),
            UpdateTaskRequest::new("Changed").with_project_id(ProjectId::new(77)),
        )
        .await;

    assert!(matches!(result, Err(TaskServiceError::ProjectNotFound(_))));
    let fetched = harness
        .service
        .get(TaskId::new(created.id))
        .await
        .expect("task exists");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_once(harness: Harness) {
    let created = harness.task(CreateTaskRequest::new("Temporary")).await;
    let id = TaskId::new(created.id);

    harness.service.delete(id).await.expect("first delete");

    assert!(matches!(
        harness.service.get(id).await,
        Err(TaskServiceError::TaskNotFound(_))
    ));
    assert!(matches!(
        harness.service.delete(id).await,
        Err(TaskServiceError::TaskNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_filters_paging_and_sort(harness: Harness) {
    let home = harness.project("Home").await;
    let work = harness.project("Work").await;
    for (title, status, project, day) in [
        ("Laundry", TaskStatus::Open, home.id(), 12),
        ("Dishes", TaskStatus::Done, home.id(), 10),
        ("Garden", TaskStatus::Open, home.id(), 5),
        ("Report", TaskStatus::Open, work.id(), 1),
    ] {
        harness
            .task(
                CreateTaskRequest::new(title)
                    .with_status(status)
                    .with_project_id(project)
                    .with_due_date(due(day)),
            )
            .await;
    }

    let query = TaskListQuery::new()
        .with_status("OPEN")
        .with_project_id(home.id().into_inner())
        .with_sort("dueDate,asc")
        .with_size(1)
        .with_page(1);
    let page = harness.service.list(query).await.expect("list succeeds");

    assert_eq!(page.total_elements(), 2);
    assert_eq!(page.total_pages(), 2);
    assert!(page.is_last());
    let titles: Vec<_> = page.content().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Laundry"]);
    assert_eq!(
        page.content().first().and_then(|t| t.project_name.as_deref()),
        Some("Home")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_unknown_status(harness: Harness) {
    let result = harness
        .service
        .list(TaskListQuery::new().with_status("BLOCKED"))
        .await;

    let Err(TaskServiceError::Validation(violations)) = result else {
        panic!("expected a validation failure");
    };
    assert!(violations.get("status").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_beyond_last_page_is_empty(harness: Harness) {
    harness.task(CreateTaskRequest::new("Only one")).await;

    let page = harness
        .service
        .list(TaskListQuery::new().with_page(3))
        .await
        .expect("list succeeds");

    assert!(page.content().is_empty());
    assert_eq!(page.total_elements(), 1);
    assert_eq!(page.number(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_project_renders_as_no_project_name(harness: Harness) {
    let project = harness.project("Short-lived").await;
    let created = harness
        .task(CreateTaskRequest::new("Survivor").with_project_id(project.id()))
        .await;
    harness
        .projects
        .delete(project.id())
        .await
        .expect("project deleted");

    let fetched = harness
        .service
        .get(TaskId::new(created.id))
        .await
        .expect("task still exists");

    assert_eq!(fetched.project_id, None);
    assert_eq!(fetched.project_name, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_detaches_it_from_listing_filters(harness: Harness) {
    let gone = harness.project("Gone").await;
    let kept = harness.project("Kept").await;
    harness
        .task(CreateTaskRequest::new("Orphaned").with_project_id(gone.id()))
        .await;
    harness
        .task(CreateTaskRequest::new("Still filed").with_project_id(kept.id()))
        .await;
    harness
        .projects
        .delete(gone.id())
        .await
        .expect("project deleted");

    let by_deleted = harness
        .service
        .list(TaskListQuery::new().with_project_id(gone.id().into_inner()))
        .await
        .expect("list succeeds");
    let by_kept = harness
        .service
        .list(TaskListQuery::new().with_project_id(kept.id().into_inner()))
        .await
        .expect("list succeeds");
    let orphaned = harness
        .service
        .list(TaskListQuery::new().with_sort("title"))
        .await
        .expect("list succeeds");

    assert_eq!(by_deleted.total_elements(), 0);
    assert_eq!(by_kept.total_elements(), 1);
    let first = orphaned.content().first().expect("orphaned task listed");
    assert_eq!(first.title, "Orphaned");
    assert_eq!(first.project_id, None);
}
