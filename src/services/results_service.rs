use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::results::{FileOverview, FileStatus, MatchResult};
use crate::services::api_client::ApiClient;

/// Default ordering of the results table: descending by match count,
/// arrival order preserved among ties (`sort_by` is stable).
pub fn sort_by_match_count(mut rows: Vec<MatchResult>) -> Vec<MatchResult> {
    rows.sort_by(|a, b| b.match_count().cmp(&a.match_count()));
    rows
}

/// Case-insensitive substring filter over each row's flattened keyword
/// list. Non-destructive: callers keep the fetched set and re-run this on
/// every keystroke. An empty query returns the rows in their current order.
pub fn filter_results(rows: &[MatchResult], query: &str) -> Vec<MatchResult> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.keyword_words()
                .any(|word| word.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

pub async fn fetch_sorted_results(
    api: &ApiClient,
    project_name: &str,
) -> Result<Vec<MatchResult>, AppError> {
    Ok(sort_by_match_count(api.fetch_results(project_name).await?))
}

/// Seconds are noise in the table; unparseable timestamps render raw.
fn display_time(status: &FileStatus) -> Option<String> {
    status
        .scanned_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .or_else(|| status.scanned_time.clone())
}

/// Joins match rows and status rows on filename. The two lists come from
/// independent calls and are not transactionally consistent, so either
/// half may be missing; result rows keep their sorted order and
/// status-only files are appended after them.
pub fn merge_overview(results: &[MatchResult], statuses: &[FileStatus]) -> Vec<FileOverview> {
    let mut overview: Vec<FileOverview> = results
        .iter()
        .map(|row| {
            let status = statuses.iter().find(|s| s.file_name == row.document_name);
            FileOverview {
                file_name: row.document_name.clone(),
                keywords: row.keywords.clone(),
                scanned: status.map(|s| s.scanned).unwrap_or_default(),
                scanned_time: status.and_then(display_time),
            }
        })
        .collect();

    for status in statuses {
        if !overview.iter().any(|o| o.file_name == status.file_name) {
            overview.push(FileOverview {
                file_name: status.file_name.clone(),
                keywords: Vec::new(),
                scanned: status.scanned,
                scanned_time: display_time(status),
            });
        }
    }
    overview
}

pub async fn fetch_overview(
    api: &ApiClient,
    project_name: &str,
) -> Result<Vec<FileOverview>, AppError> {
    let results = fetch_sorted_results(api, project_name).await?;
    let statuses = api.fetch_statuses(project_name).await?;
    Ok(merge_overview(&results, &statuses))
}

/// Deletes one file, then unconditionally re-fetches both lists. No
/// optimistic local removal: the extra round trip guarantees the view
/// never shows a file the backend already dropped.
pub async fn delete_and_refresh(
    api: &ApiClient,
    project_name: &str,
    file_name: &str,
) -> Result<Vec<FileOverview>, AppError> {
    api.delete_file(project_name, file_name).await?;
    fetch_overview(api, project_name).await
}

/// Downloads the project's zip archive and writes it next to the user's
/// other downloads unless a destination directory is given. Returns the
/// saved path.
pub async fn save_archive(
    api: &ApiClient,
    project_name: &str,
    dest_dir: Option<&Path>,
) -> Result<PathBuf, AppError> {
    let bytes = api.download_archive(project_name).await?;

    let dir = match dest_dir {
        Some(dir) => dir.to_path_buf(),
        None => directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            .ok_or_else(|| AppError::General("could not resolve downloads directory".to_string()))?,
    };
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(format!("{project_name}.zip"));
    std::fs::write(&path, bytes)?;
    Ok(path)
}
