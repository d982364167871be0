//! Then steps for task listing scenarios.

use super::world::ListingWorld;
use rstest_bdd_macros::then;
use task_tracker::task::services::TaskServiceError;

#[then(r#"the listing titles are "{titles}""#)]
fn listing_titles(world: &ListingWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    let actual: Vec<&str> = world
        .listing()?
        .content()
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected titles {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the listing reports {total:u64} matching tasks")]
fn listing_total(world: &ListingWorld, total: u64) -> Result<(), eyre::Report> {
    let found = world.listing()?.total_elements();
    if found != total {
        return Err(eyre::eyre!("expected {total} matching tasks, found {found}"));
    }
    Ok(())
}

#[then("every listed task names its project")]
fn every_task_names_project(world: &ListingWorld) -> Result<(), eyre::Report> {
    let page = world.listing()?;
    if let Some(task) = page.content().iter().find(|task| task.project_name.is_none()) {
        return Err(eyre::eyre!("task {} has no project name", task.id));
    }
    Ok(())
}

#[then("the page is neither first nor last")]
fn page_in_the_middle(world: &ListingWorld) -> Result<(), eyre::Report> {
    let page = world.listing()?;
    if page.is_first() || page.is_last() {
        return Err(eyre::eyre!(
            "expected a middle page, got page {} of {}",
            page.number(),
            page.total_pages()
        ));
    }
    Ok(())
}

#[then("the page size is {size:u32}")]
fn page_size(world: &ListingWorld, size: u32) -> Result<(), eyre::Report> {
    let found = world.listing()?.size();
    if found != size {
        return Err(eyre::eyre!("expected page size {size}, found {found}"));
    }
    Ok(())
}

#[then(r#"the listing is rejected with a violation on "{field}""#)]
fn listing_rejected(world: &ListingWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no listing was requested in this scenario"))?;
    match result {
        Err(TaskServiceError::Validation(violations)) if violations.get(&field).is_some() => {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected a validation failure on {field}, got {other:?}"
        )),
    }
}
