//! Task repository behaviour against a real database.

use super::helpers::{store_project, temporary_database};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;
use task_tracker::project::{domain::ProjectId, ports::ProjectRepository};
use task_tracker::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{
        NewTask, PageRequest, SortDirection, Task, TaskDescription, TaskFields, TaskFilter,
        TaskId, TaskPriority, TaskSort, TaskSortField, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

fn draft(
    title: &str,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    project_id: Option<ProjectId>,
) -> NewTask {
    let fields = TaskFields::parse(
        title.to_owned(),
        Some(format!("About {title}")),
        Some(status),
        Some(TaskPriority::High),
        due_date,
        project_id,
    )
    .expect("valid fields");
    NewTask::new(fields, &DefaultClock)
}

async fn store(repository: &PostgresTaskRepository, task: NewTask) -> Task {
    repository.store(&task).await.expect("task stored")
}

fn day(value: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2026, 12, value)
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_tasks_round_trip() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let project = store_project(&database.projects(), "Home").await;

    let first = store(&tasks, draft("Paint", TaskStatus::Open, day(3), Some(project.id()))).await;
    let second = store(&tasks, draft("Sand", TaskStatus::Done, None, None)).await;

    assert!(second.id() > first.id());
    let fetched = tasks
        .find_by_id(first.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(fetched.title().as_str(), "Paint");
    assert_eq!(fetched.description().map(TaskDescription::as_str), Some("About Paint"));
    assert_eq!(fetched.due_date(), day(3));
    assert_eq!(fetched.project_id(), Some(project.id()));
    assert_eq!(fetched.priority(), TaskPriority::High);
    assert_eq!(tasks.count().await.expect("count"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites_and_clears_nullable_columns() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let project = store_project(&database.projects(), "Home").await;
    let mut task = store(&tasks, draft("Paint", TaskStatus::Open, day(3), Some(project.id()))).await;

    let cleared = TaskFields::parse("Repaint".to_owned(), None, None, None, None, None)
        .expect("valid fields");
    task.apply_update(cleared, &DefaultClock);
    tasks.update(&task).await.expect("update succeeds");

    let fetched = tasks
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(fetched.title().as_str(), "Repaint");
    assert_eq!(fetched.description(), None);
    assert_eq!(fetched.due_date(), None);
    assert_eq!(fetched.project_id(), None);
    assert_eq!(fetched.status(), TaskStatus::Open);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_missing_rows() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let task = store(&tasks, draft("Gone", TaskStatus::Open, None, None)).await;
    tasks.delete(task.id()).await.expect("first delete");

    assert!(matches!(
        tasks.update(&task).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        tasks.delete(TaskId::new(task.id().into_inner())).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_combine_and_totals_cover_all_pages() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let projects = database.projects();
    let home = store_project(&projects, "Home").await;
    let work = store_project(&projects, "Work").await;
    store(&tasks, draft("A", TaskStatus::Open, None, Some(home.id()))).await;
    store(&tasks, draft("B", TaskStatus::Open, None, Some(home.id()))).await;
    store(&tasks, draft("C", TaskStatus::Done, None, Some(home.id()))).await;
    store(&tasks, draft("D", TaskStatus::Open, None, Some(work.id()))).await;
    store(&tasks, draft("E", TaskStatus::Open, None, None)).await;

    let filter = TaskFilter::unfiltered()
        .with_status(TaskStatus::Open)
        .with_project(home.id());
    let sort = TaskSort::new(TaskSortField::Title, SortDirection::Asc);
    let page = tasks
        .find_page(&filter, &PageRequest::new(Some(1), Some(1), sort))
        .await
        .expect("page loads");

    assert_eq!(page.total_elements(), 2);
    assert_eq!(titles(page.content()), ["B"]);

    let all_open = tasks
        .find_page(
            &TaskFilter::unfiltered().with_status(TaskStatus::Open),
            &PageRequest::new(None, None, sort),
        )
        .await
        .expect("page loads");
    assert_eq!(titles(all_open.content()), ["A", "B", "D", "E"]);
}

#[rstest]
#[case(SortDirection::Asc, ["Early", "Late", "Undated"])]
#[case(SortDirection::Desc, ["Undated", "Late", "Early"])]
#[tokio::test(flavor = "multi_thread")]
async fn missing_due_dates_follow_direction(
    #[case] direction: SortDirection,
    #[case] expected: [&str; 3],
) {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    store(&tasks, draft("Undated", TaskStatus::Open, None, None)).await;
    store(&tasks, draft("Late", TaskStatus::Open, day(20), None)).await;
    store(&tasks, draft("Early", TaskStatus::Open, day(2), None)).await;

    let sort = TaskSort::new(TaskSortField::DueDate, direction);
    let page = tasks
        .find_page(&TaskFilter::unfiltered(), &PageRequest::new(None, None, sort))
        .await
        .expect("page loads");

    assert_eq!(titles(page.content()), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_sort_keys_fall_back_to_ascending_id() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let first = store(&tasks, draft("Same", TaskStatus::Open, day(1), None)).await;
    let second = store(&tasks, draft("Same", TaskStatus::Open, day(1), None)).await;

    let sort = TaskSort::new(TaskSortField::Title, SortDirection::Desc);
    let page = tasks
        .find_page(&TaskFilter::unfiltered(), &PageRequest::new(None, None, sort))
        .await
        .expect("page loads");

    let ids: Vec<_> = page.content().iter().map(Task::id).collect();
    assert_eq!(ids, [first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_detaches_its_tasks() {
    let Some(database) = temporary_database().await else {
        return;
    };
    let tasks = database.tasks();
    let projects = database.projects();
    let project = store_project(&projects, "Temporary").await;
    let task = store(&tasks, draft("Keep me", TaskStatus::Open, None, Some(project.id()))).await;

    projects.delete(project.id()).await.expect("project deleted");

    let fetched = tasks
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task survives");
    assert_eq!(fetched.project_id(), None);
}
