//! When steps for task listing scenarios.

use super::world::{ListingWorld, run_async};
use rstest_bdd_macros::when;
use task_tracker::task::services::TaskListQuery;

#[when(r#"the listing is filtered by status "{status}" in project "{project}""#)]
fn list_by_status_in_project(
    world: &mut ListingWorld,
    status: String,
    project: String,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project_ids
        .get(&project)
        .ok_or_else(|| eyre::eyre!("unknown project {project} in scenario world"))?;
    let query = TaskListQuery::new()
        .with_status(status)
        .with_project_id(project_id.into_inner());
    world.last_listing = Some(run_async(world.tasks.list(query)));
    Ok(())
}

#[when(r#"page {page:i64} of size {size:i64} is requested sorted by "{sort}""#)]
fn list_sorted_page(world: &mut ListingWorld, page: i64, size: i64, sort: String) {
    let query = TaskListQuery::new()
        .with_page(page)
        .with_size(size)
        .with_sort(sort);
    world.last_listing = Some(run_async(world.tasks.list(query)));
}

#[when(r#"tasks are requested with the raw status "{status}""#)]
fn list_with_raw_status(world: &mut ListingWorld, status: String) {
    let query = TaskListQuery::new().with_status(status);
    world.last_listing = Some(run_async(world.tasks.list(query)));
}
