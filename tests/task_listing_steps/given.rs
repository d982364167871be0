//! Given steps for task listing scenarios.

use super::world::{ListingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_tracker::project::{domain::ProjectId, services::CreateProjectRequest};
use task_tracker::task::{
    domain::{TaskPriority, TaskStatus},
    services::CreateTaskRequest,
};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut ListingWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(world.projects.create(CreateProjectRequest::new(name.clone())))
        .wrap_err("create project")?;
    world.project_ids.insert(name, ProjectId::new(created.id));
    Ok(())
}

#[given(
    r#"a task "{title}" with status "{status}" and priority "{priority}" in project "{project}""#
)]
fn task_in_project(
    world: &mut ListingWorld,
    title: String,
    status: String,
    priority: String,
    project: String,
) -> Result<(), eyre::Report> {
    let project_id = *world
        .project_ids
        .get(&project)
        .ok_or_else(|| eyre::eyre!("unknown project {project} in scenario world"))?;
    let request = CreateTaskRequest::new(title)
        .with_status(TaskStatus::try_from(status.as_str())?)
        .with_priority(TaskPriority::try_from(priority.as_str())?)
        .with_project_id(project_id);
    run_async(world.tasks.create(request)).wrap_err("create task")?;
    Ok(())
}

#[given("{count:u32} numbered tasks exist")]
fn numbered_tasks(world: &mut ListingWorld, count: u32) -> Result<(), eyre::Report> {
    for number in 1..=count {
        let request = CreateTaskRequest::new(format!("Task {number}"));
        run_async(world.tasks.create(request)).wrap_err("create numbered task")?;
    }
    Ok(())
}
