use tauri::{command, AppHandle, Emitter, State};

use crate::error::AppError;
use crate::models::upload::{PendingFile, UploadPhase};
use crate::services::upload_service;
use crate::state::{AppState, UploadSlot};

#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadProgress {
    pub project_name: String,
    pub phase: UploadPhase,
}

fn emit_upload_progress(app: &AppHandle, project_name: &str, phase: UploadPhase) {
    let payload = UploadProgress {
        project_name: project_name.to_string(),
        phase,
    };
    let _ = app.emit("upload-progress", &payload);
}

#[command]
pub fn get_upload_state(project_name: String, state: State<'_, AppState>) -> UploadSlot {
    state.with_upload_slot(&project_name, |slot| slot.clone())
}

#[command]
pub fn stage_files(
    project_name: String,
    paths: Vec<String>,
    state: State<'_, AppState>,
) -> Result<Vec<PendingFile>, AppError> {
    state.with_upload_slot(&project_name, |slot| {
        upload_service::stage_files(slot, &paths)?;
        Ok(slot.pending.clone())
    })
}

#[command]
pub fn remove_pending_file(
    project_name: String,
    id: String,
    state: State<'_, AppState>,
) -> Vec<PendingFile> {
    state.with_upload_slot(&project_name, |slot| {
        upload_service::remove_pending(&mut slot.pending, &id);
        slot.pending.clone()
    })
}

#[command]
pub fn clear_pending_files(project_name: String, state: State<'_, AppState>) {
    state.with_upload_slot(&project_name, |slot| slot.pending.clear());
}

/// Resets a failed flow back to `idle`; the pending list is retained so a
/// retry needs no re-staging.
#[command]
pub fn acknowledge_upload_error(project_name: String, state: State<'_, AppState>) -> UploadSlot {
    state.with_upload_slot(&project_name, |slot| {
        if slot.phase == UploadPhase::Error {
            slot.phase = UploadPhase::Idle;
        }
        slot.clone()
    })
}

/// Runs upload then processing for the staged files, emitting
/// `upload-progress` events for each phase transition. There is no
/// cancellation once this starts.
#[command]
pub async fn upload_and_process(
    project_name: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    // Claims the slot atomically; a second invocation while this one is
    // still reading or sending files fails the busy check.
    let files = state.begin_upload(&project_name)?;
    emit_upload_progress(&app, &project_name, UploadPhase::Uploading);

    let result = upload_service::upload_and_process(&state.api, &files, |phase| {
        state.set_upload_phase(&project_name, phase);
        emit_upload_progress(&app, &project_name, phase);
    })
    .await;

    match result {
        Ok(message) => {
            state.with_upload_slot(&project_name, |slot| slot.pending.clear());
            Ok(message)
        }
        Err(err) => {
            // Validation failures never claimed the network, so the slot
            // goes straight back to idle instead of the error phase.
            if matches!(err, AppError::Validation(_)) {
                state.set_upload_phase(&project_name, UploadPhase::Idle);
            }
            Err(err)
        }
    }
}
