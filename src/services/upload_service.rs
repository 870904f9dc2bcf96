use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::models::upload::{PendingFile, UploadPhase};
use crate::services::api_client::ApiClient;
use crate::state::UploadSlot;

const COMBINED_UPLOAD_ERROR: &str = "Something went wrong while uploading or processing the files.";

/// Adds picked files to a slot's pending list. Rejected while a run is in
/// flight; staging after a finished or failed run starts a fresh flow.
/// Paths staged twice are skipped; directories are rejected.
pub fn stage_files(slot: &mut UploadSlot, paths: &[String]) -> Result<Vec<PendingFile>, AppError> {
    if slot.phase.is_busy() {
        return Err(AppError::validation("An upload is already in progress."));
    }
    slot.phase = UploadPhase::Idle;

    let mut added = Vec::new();
    for path in paths {
        if slot.pending.iter().any(|f| &f.path == path) {
            continue;
        }
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(AppError::General(format!("not a file: {path}")));
        }
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::General(format!("invalid file path: {path}")))?;

        let file = PendingFile {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            path: path.clone(),
            size_bytes: metadata.len(),
        };
        slot.pending.push(file.clone());
        added.push(file);
    }
    Ok(added)
}

/// Drops one staged entry before submission; no-op when the id is unknown.
pub fn remove_pending(pending: &mut Vec<PendingFile>, id: &str) {
    pending.retain(|f| f.id != id);
}

fn read_parts(files: &[PendingFile]) -> Result<Vec<(String, Vec<u8>)>, AppError> {
    files
        .iter()
        .map(|f| Ok((f.name.clone(), fs::read(&f.path)?)))
        .collect()
}

/// Runs the two-step upload flow: multipart upload, then processing.
/// `on_phase` observes every transition so the view can render step-wise
/// feedback. Either step's failure reports one generic combined error and
/// ends in the `Error` phase; partial success (upload ok, processing
/// failed) is not separately surfaced.
pub async fn upload_and_process(
    api: &ApiClient,
    files: &[PendingFile],
    mut on_phase: impl FnMut(UploadPhase),
) -> Result<String, AppError> {
    if files.is_empty() {
        return Err(AppError::validation("Select at least one file."));
    }

    let parts = match read_parts(files) {
        Ok(parts) => parts,
        Err(err) => {
            eprintln!("[upload] reading staged files failed: {err}");
            on_phase(UploadPhase::Error);
            return Err(AppError::General(COMBINED_UPLOAD_ERROR.to_string()));
        }
    };

    on_phase(UploadPhase::Uploading);
    if let Err(err) = api.upload_files(parts).await {
        eprintln!("[upload] upload step failed: {err}");
        on_phase(UploadPhase::Error);
        return Err(AppError::General(COMBINED_UPLOAD_ERROR.to_string()));
    }

    on_phase(UploadPhase::Processing);
    match api.process_files().await {
        Ok(message) => {
            on_phase(UploadPhase::Complete);
            Ok(message)
        }
        Err(err) => {
            eprintln!("[upload] processing step failed: {err}");
            on_phase(UploadPhase::Error);
            Err(AppError::General(COMBINED_UPLOAD_ERROR.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn staged_file(dir: &Path, name: &str, contents: &[u8]) -> PendingFile {
        let file_path = dir.join(name);
        std::fs::File::create(&file_path)
            .unwrap()
            .write_all(contents)
            .unwrap();
        let mut slot = UploadSlot::default();
        stage_files(&mut slot, &[file_path.to_string_lossy().to_string()]).unwrap();
        slot.pending.pop().unwrap()
    }

    #[test]
    fn stage_files_skips_duplicates_and_records_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("a.pdf");
        std::fs::write(&file_path, b"12345").unwrap();
        let path_str = file_path.to_string_lossy().to_string();

        let mut slot = UploadSlot::default();
        let added = stage_files(&mut slot, &[path_str.clone(), path_str.clone()]).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(slot.pending.len(), 1);
        assert_eq!(slot.pending[0].name, "a.pdf");
        assert_eq!(slot.pending[0].size_bytes, 5);

        stage_files(&mut slot, &[path_str]).unwrap();
        assert_eq!(slot.pending.len(), 1);
    }

    #[test]
    fn staging_is_rejected_while_a_run_is_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("a.pdf");
        std::fs::write(&file_path, b"x").unwrap();

        let mut slot = UploadSlot::default();
        slot.phase = UploadPhase::Uploading;
        let err = stage_files(&mut slot, &[file_path.to_string_lossy().to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(slot.pending.is_empty());
        assert_eq!(slot.phase, UploadPhase::Uploading);
    }

    #[test]
    fn staging_after_a_finished_run_resets_the_phase() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("a.pdf");
        std::fs::write(&file_path, b"x").unwrap();

        let mut slot = UploadSlot::default();
        slot.phase = UploadPhase::Complete;
        stage_files(&mut slot, &[file_path.to_string_lossy().to_string()]).unwrap();
        assert_eq!(slot.phase, UploadPhase::Idle);
        assert_eq!(slot.pending.len(), 1);
    }

    #[test]
    fn remove_pending_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let file = staged_file(dir.path(), "a.pdf", b"x");
        let mut pending = vec![file.clone()];

        remove_pending(&mut pending, "not-an-id");
        assert_eq!(pending.len(), 1);
        remove_pending(&mut pending, &file.id);
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn empty_list_is_rejected_before_any_network_call() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut phases = Vec::new();
        let err = upload_and_process(&api, &[], |p| phases.push(p))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(phases.is_empty());
    }

    #[tokio::test]
    async fn unreadable_staged_file_ends_in_the_error_phase() {
        let dir = tempfile::tempdir().unwrap();
        let file = staged_file(dir.path(), "a.pdf", b"x");
        std::fs::remove_file(&file.path).unwrap();

        let api = ApiClient::new("http://127.0.0.1:9");
        let mut phases = Vec::new();
        let err = upload_and_process(&api, &[file], |p| phases.push(p))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), COMBINED_UPLOAD_ERROR);
        assert_eq!(phases, vec![UploadPhase::Error]);
    }

    #[tokio::test]
    async fn successful_flow_steps_through_uploading_then_processing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-multiple"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "uploaded" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/process-files"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "processed" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = staged_file(dir.path(), "a.pdf", b"contents");

        let api = ApiClient::new(server.uri());
        let mut phases = Vec::new();
        let message = upload_and_process(&api, &[file], |p| phases.push(p))
            .await
            .unwrap();

        assert_eq!(message, "processed");
        assert_eq!(
            phases,
            vec![
                UploadPhase::Uploading,
                UploadPhase::Processing,
                UploadPhase::Complete
            ]
        );
    }

    #[tokio::test]
    async fn upload_failure_skips_processing_and_reports_combined_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-multiple"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "disk full" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/process-files"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = staged_file(dir.path(), "a.pdf", b"contents");

        let api = ApiClient::new(server.uri());
        let mut phases = Vec::new();
        let err = upload_and_process(&api, &[file], |p| phases.push(p))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), COMBINED_UPLOAD_ERROR);
        assert_eq!(phases, vec![UploadPhase::Uploading, UploadPhase::Error]);
    }

    #[tokio::test]
    async fn processing_failure_also_reports_the_combined_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-multiple"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/process-files"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = staged_file(dir.path(), "a.pdf", b"contents");

        let api = ApiClient::new(server.uri());
        let mut phases = Vec::new();
        let err = upload_and_process(&api, &[file], |p| phases.push(p))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), COMBINED_UPLOAD_ERROR);
        assert_eq!(
            phases,
            vec![
                UploadPhase::Uploading,
                UploadPhase::Processing,
                UploadPhase::Error
            ]
        );
    }
}
