use tauri::{command, State};

use crate::error::AppError;
use crate::models::scan::{DocumentSelection, ScanDraft, SearchScope};
use crate::services::scan_service;
use crate::state::AppState;

#[command]
pub fn get_scan_draft(project_name: String, state: State<'_, AppState>) -> ScanDraft {
    state.with_draft(&project_name, |draft| draft.clone())
}

#[command]
pub fn add_keyword(project_name: String, keyword: String, state: State<'_, AppState>) -> ScanDraft {
    state.with_draft(&project_name, |draft| {
        draft.add_keyword(&keyword);
        draft.clone()
    })
}

#[command]
pub fn remove_keyword(
    project_name: String,
    keyword: String,
    state: State<'_, AppState>,
) -> ScanDraft {
    state.with_draft(&project_name, |draft| {
        draft.remove_keyword(&keyword);
        draft.clone()
    })
}

#[command]
pub fn remove_synonym(
    project_name: String,
    synonym: String,
    state: State<'_, AppState>,
) -> ScanDraft {
    state.with_draft(&project_name, |draft| {
        draft.remove_synonym(&synonym);
        draft.clone()
    })
}

#[command]
pub fn set_search_scope(
    project_name: String,
    scope: SearchScope,
    state: State<'_, AppState>,
) -> ScanDraft {
    state.with_draft(&project_name, |draft| {
        draft.scope = scope;
        draft.clone()
    })
}

#[command]
pub fn set_document_selection(
    project_name: String,
    selection: DocumentSelection,
    state: State<'_, AppState>,
) -> ScanDraft {
    state.with_draft(&project_name, |draft| {
        draft.selection = selection;
        draft.clone()
    })
}

/// Called when the scan view unmounts; drafts are per-view state.
#[command]
pub fn discard_scan_draft(project_name: String, state: State<'_, AppState>) {
    state.discard_draft(&project_name);
}

#[command]
pub async fn generate_synonyms(
    project_name: String,
    state: State<'_, AppState>,
) -> Result<ScanDraft, AppError> {
    let keywords = state.with_draft(&project_name, |draft| draft.keywords.clone());
    let synonyms = scan_service::generate_synonyms(&state.api, &keywords).await?;
    Ok(state.with_draft(&project_name, |draft| {
        draft.replace_synonyms(synonyms);
        draft.clone()
    }))
}

/// Submits the scan and returns the results route to navigate to. The
/// draft is only discarded on success; a failure leaves the view as-is so
/// the user can retry.
#[command]
pub async fn start_scan(
    project_name: String,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    let draft = state.with_draft(&project_name, |draft| draft.clone());
    let route = scan_service::start_scan(&state.api, &draft, &project_name).await?;
    state.discard_draft(&project_name);
    Ok(route)
}
