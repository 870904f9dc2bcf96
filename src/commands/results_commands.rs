use std::path::Path;

use tauri::{command, State};

use crate::error::AppError;
use crate::models::results::{DistanceBand, DocChunk, FileOverview, FileStatus, MatchResult};
use crate::services::results_service;
use crate::state::AppState;

#[derive(Debug, serde::Serialize)]
pub struct DistanceLegendEntry {
    pub band: DistanceBand,
    pub color: &'static str,
}

#[command]
pub async fn fetch_project_results(
    project_name: String,
    state: State<'_, AppState>,
) -> Result<Vec<MatchResult>, AppError> {
    results_service::fetch_sorted_results(&state.api, &project_name).await
}

#[command]
pub async fn fetch_file_statuses(
    project_name: String,
    state: State<'_, AppState>,
) -> Result<Vec<FileStatus>, AppError> {
    state.api.fetch_statuses(&project_name).await
}

/// Match rows and scan statuses merged per filename. Two independent
/// backend calls; a file may briefly appear in only one of them.
#[command]
pub async fn fetch_project_overview(
    project_name: String,
    state: State<'_, AppState>,
) -> Result<Vec<FileOverview>, AppError> {
    results_service::fetch_overview(&state.api, &project_name).await
}

/// Pure, recomputed on every keystroke; the webview keeps the fetched set.
#[command]
pub fn filter_results(rows: Vec<MatchResult>, query: String) -> Vec<MatchResult> {
    results_service::filter_results(&rows, &query)
}

#[command]
pub fn band_for_distance(distance: f64) -> DistanceLegendEntry {
    let band = DistanceBand::from_distance(distance);
    DistanceLegendEntry {
        band,
        color: band.color(),
    }
}

#[command]
pub async fn delete_file(
    project_name: String,
    file_name: String,
    state: State<'_, AppState>,
) -> Result<Vec<FileOverview>, AppError> {
    results_service::delete_and_refresh(&state.api, &project_name, &file_name).await
}

#[command]
pub async fn fetch_doc_results(
    filename: String,
    state: State<'_, AppState>,
) -> Result<Vec<DocChunk>, AppError> {
    state.api.fetch_doc_results(&filename).await
}

/// Saves the project's zip archive and returns the written path.
#[command]
pub async fn download_archive(
    project_name: String,
    dest_dir: Option<String>,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    let dest = dest_dir.as_deref().map(Path::new);
    let path = results_service::save_archive(&state.api, &project_name, dest).await?;
    Ok(path.to_string_lossy().to_string())
}
