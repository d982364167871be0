//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::project::domain::ProjectId;
use crate::storage::PgPool;
use crate::task::{
    domain::{
        NewTask, Page, PageRequest, PersistedTaskData, SortDirection, Task, TaskDescription,
        TaskFilter, TaskId, TaskPriority, TaskSort, TaskSortField, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;

type BoxedTaskQuery = tasks::BoxedQuery<'static, Pg>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            due_date: task.due_date(),
            project_id: task.project_id().map(ProjectId::into_inner),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_page(
        &self,
        filter: &TaskFilter,
        page: &PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let predicate = *filter;
        let request = *page;
        let offset = i64::try_from(request.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = i64::from(request.size());

        self.run_blocking(move |connection| {
            let total = filtered(&predicate)
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let rows = ordered(filtered(&predicate), request.sort())
                .limit(limit)
                .offset(offset)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let content = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            let total_elements = u64::try_from(total).map_err(TaskRepositoryError::persistence)?;
            Ok(Page::new(content, total_elements, &request))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Builds the `WHERE` clause: one equality term per present filter.
fn filtered(filter: &TaskFilter) -> BoxedTaskQuery {
    let mut query = tasks::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(project_id) = filter.project_id {
        query = query.filter(tasks::project_id.eq(project_id.into_inner()));
    }
    query
}

/// Applies the primary ordering followed by the ascending-id tie-breaker.
///
/// `PostgreSQL` places nulls last for `ASC` and first for `DESC`, which is the
/// due-date ordering listings promise.
fn ordered(query: BoxedTaskQuery, sort: TaskSort) -> BoxedTaskQuery {
    let primary = match (sort.field, sort.direction) {
        (TaskSortField::Id, SortDirection::Asc) => query.order_by(tasks::id.asc()),
        (TaskSortField::Id, SortDirection::Desc) => query.order_by(tasks::id.desc()),
        (TaskSortField::Title, SortDirection::Asc) => query.order_by(tasks::title.asc()),
        (TaskSortField::Title, SortDirection::Desc) => query.order_by(tasks::title.desc()),
        (TaskSortField::Status, SortDirection::Asc) => query.order_by(tasks::status.asc()),
        (TaskSortField::Status, SortDirection::Desc) => query.order_by(tasks::status.desc()),
        (TaskSortField::Priority, SortDirection::Asc) => query.order_by(tasks::priority.asc()),
        (TaskSortField::Priority, SortDirection::Desc) => query.order_by(tasks::priority.desc()),
        (TaskSortField::DueDate, SortDirection::Asc) => query.order_by(tasks::due_date.asc()),
        (TaskSortField::DueDate, SortDirection::Desc) => query.order_by(tasks::due_date.desc()),
        (TaskSortField::CreatedAt, SortDirection::Asc) => query.order_by(tasks::created_at.asc()),
        (TaskSortField::CreatedAt, SortDirection::Desc) => {
            query.order_by(tasks::created_at.desc())
        }
        (TaskSortField::UpdatedAt, SortDirection::Asc) => query.order_by(tasks::updated_at.asc()),
        (TaskSortField::UpdatedAt, SortDirection::Desc) => {
            query.order_by(tasks::updated_at.desc())
        }
    };
    primary.then_order_by(tasks::id.asc())
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|text| text.as_str().to_owned()),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        project_id: task.project_id().map(ProjectId::into_inner),
        created_at: task.created_at(),
        updated_at: task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        priority,
        due_date,
        project_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description: TaskDescription::parse(description)
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        due_date,
        project_id: project_id.map(ProjectId::new),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
