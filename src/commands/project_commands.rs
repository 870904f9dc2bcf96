use tauri::{command, State};

use crate::error::AppError;
use crate::models::project::ProjectRecord;
use crate::services::project_service;
use crate::state::AppState;

#[command]
pub async fn list_projects(state: State<'_, AppState>) -> Result<Vec<ProjectRecord>, AppError> {
    state.api.list_projects().await
}

#[command]
pub fn filter_projects(projects: Vec<ProjectRecord>, query: String) -> Vec<ProjectRecord> {
    project_service::filter_projects(&projects, &query)
}

/// Validates locally (blank / case-insensitive duplicate), creates the
/// project, and returns the new-scan route to navigate to.
#[command]
pub async fn create_project(
    name: String,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    project_service::create_project(&state.api, &name).await
}

/// `confirmed` must be true: the view shows an explicit confirmation step
/// before the destructive call fires. Returns the refreshed list.
#[command]
pub async fn delete_project(
    project_name: String,
    confirmed: bool,
    state: State<'_, AppState>,
) -> Result<Vec<ProjectRecord>, AppError> {
    project_service::delete_project(&state.api, &project_name, confirmed).await
}

#[command]
pub async fn reset_projects(
    confirmed: bool,
    state: State<'_, AppState>,
) -> Result<Vec<ProjectRecord>, AppError> {
    project_service::reset_projects(&state.api, confirmed).await
}
