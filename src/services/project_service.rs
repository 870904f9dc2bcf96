use crate::error::AppError;
use crate::models::project::ProjectRecord;
use crate::services::api_client::ApiClient;
use crate::services::navigation_service::Route;

/// Local pre-flight checks for a new project name. Blank names and
/// case-insensitive duplicates never reach the backend.
pub fn validate_new_name(existing: &[ProjectRecord], name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Project name cannot be empty."));
    }
    let lowered = name.to_lowercase();
    if existing
        .iter()
        .any(|p| p.project_name.to_lowercase() == lowered)
    {
        return Err(AppError::validation(format!(
            "A project named '{name}' already exists."
        )));
    }
    Ok(name.to_string())
}

/// Substring filter on project name, re-applied on every input change.
pub fn filter_projects(projects: &[ProjectRecord], query: &str) -> Vec<ProjectRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.to_vec();
    }
    projects
        .iter()
        .filter(|p| p.project_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Creates the project and registers it as the backend session's active
/// project, then hands back the new-scan route.
pub async fn create_project(api: &ApiClient, name: &str) -> Result<String, AppError> {
    let existing = api.list_projects().await?;
    let name = validate_new_name(&existing, name)?;

    api.create_project(&name).await?;
    api.set_project_name(&name).await?;

    Ok(Route::NewScan.to_path())
}

fn require_confirmation(confirmed: bool, action: &str) -> Result<(), AppError> {
    if confirmed {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{action} requires explicit confirmation."
        )))
    }
}

/// Destructive; the caller must have shown a confirmation step. Refreshes
/// the full list afterwards.
pub async fn delete_project(
    api: &ApiClient,
    name: &str,
    confirmed: bool,
) -> Result<Vec<ProjectRecord>, AppError> {
    require_confirmation(confirmed, "Deleting a project")?;
    api.delete_project(name).await?;
    api.list_projects().await
}

/// Deletes every project in turn, then refreshes the list.
pub async fn reset_projects(
    api: &ApiClient,
    confirmed: bool,
) -> Result<Vec<ProjectRecord>, AppError> {
    require_confirmation(confirmed, "Resetting all projects")?;
    for project in api.list_projects().await? {
        api.delete_project(&project.project_name).await?;
    }
    api.list_projects().await
}
