//! In-memory repository for project tests and the memory storage backend.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::project::{
    domain::{NewProject, Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::adapters::memory::InMemoryTaskRepository;

/// Thread-safe in-memory project repository.
///
/// Identifiers are issued from a counter starting at 1, mirroring a
/// `BIGSERIAL` column. When built with [`Self::with_task_references`],
/// deleting a project clears the reference on the linked tasks, matching the
/// `ON DELETE SET NULL` foreign key of the Postgres schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
    tasks: Option<InMemoryTaskRepository>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    last_id: i64,
    projects: BTreeMap<ProjectId, Project>,
    name_index: HashMap<ProjectName, ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose deletions detach the project from
    /// tasks stored in `tasks`.
    #[must_use]
    pub fn with_task_references(tasks: InMemoryTaskRepository) -> Self {
        Self {
            state: Arc::default(),
            tasks: Some(tasks),
        }
    }

    fn read_state(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, InMemoryProjectState>> {
        self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, InMemoryProjectState>> {
        self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.write_state()?;
        let name = project.details().name.clone();
        if state.name_index.contains_key(&name) {
            return Err(ProjectRepositoryError::DuplicateName(name));
        }

        state.last_id += 1;
        let id = ProjectId::new(state.last_id);
        let stored = project.clone().assign_id(id);
        state.name_index.insert(name, id);
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write_state()?;
        let old_name = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .name()
            .clone();

        if let Some(owner) = state.name_index.get(project.name())
            && *owner != project.id()
        {
            return Err(ProjectRepositoryError::DuplicateName(project.name().clone()));
        }

        state.name_index.remove(&old_name);
        state.name_index.insert(project.name().clone(), project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read_state()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read_state()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.projects.get(id).cloned())
            .collect())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read_state()?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        {
            let mut state = self.write_state()?;
            let removed = state
                .projects
                .remove(&id)
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            state.name_index.remove(removed.name());
        }
        if let Some(tasks) = &self.tasks {
            let detached = tasks
                .detach_project(id)
                .map_err(ProjectRepositoryError::persistence)?;
            tracing::debug!(project_id = %id, detached, "cleared task references");
        }
        Ok(())
    }

    async fn count(&self) -> ProjectRepositoryResult<u64> {
        let state = self.read_state()?;
        Ok(u64::try_from(state.projects.len()).unwrap_or(u64::MAX))
    }
}
