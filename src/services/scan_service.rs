use crate::error::AppError;
use crate::models::scan::{DocumentSelection, ScanDraft};
use crate::services::api_client::ApiClient;
use crate::services::navigation_service::Route;

/// Fetches a fresh synonym set for the current keywords. The caller
/// replaces the draft's synonym list only on success, so a backend failure
/// leaves both lists untouched.
pub async fn generate_synonyms(
    api: &ApiClient,
    keywords: &[String],
) -> Result<Vec<String>, AppError> {
    if keywords.is_empty() {
        return Err(AppError::validation(
            "No keywords available to generate synonyms.",
        ));
    }
    api.get_synonyms(keywords).await
}

/// Submits the draft as a scan request and returns the results route for
/// the project. The draft is read-only here: a failed submission is safe
/// to retry as-is.
pub async fn start_scan(
    api: &ApiClient,
    draft: &ScanDraft,
    project_name: &str,
) -> Result<String, AppError> {
    if draft.is_empty() {
        return Err(AppError::validation(
            "No keywords or synonyms available to search.",
        ));
    }

    let terms = draft.combined_terms();
    let unscanned_only = draft.selection == DocumentSelection::OnlyUnscanned;
    api.start_scan(&terms, draft.scope, unscanned_only).await?;

    Ok(Route::Results {
        project_name: project_name.to_string(),
    }
    .to_path())
}
