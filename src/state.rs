use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::scan::ScanDraft;
use crate::models::upload::{PendingFile, UploadPhase};
use crate::services::api_client::ApiClient;

/// Per-project upload widget state: the staged files and the current step
/// of the upload flow.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UploadSlot {
    pub pending: Vec<PendingFile>,
    pub phase: UploadPhase,
}

/// Everything the Rust layer holds for the webview. Each view owns its
/// fetched copy of server data; only the transient editor state (scan
/// drafts, upload slots) and the visited-path history live here, keyed by
/// project name so identity never depends on a server-side "current
/// project" pointer.
pub struct AppState {
    pub api: ApiClient,
    pub drafts: Mutex<HashMap<String, ScanDraft>>,
    pub uploads: Mutex<HashMap<String, UploadSlot>>,
    pub history: Mutex<Vec<String>>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            drafts: Mutex::new(HashMap::new()),
            uploads: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn with_draft<T>(&self, project: &str, f: impl FnOnce(&mut ScanDraft) -> T) -> T {
        let mut drafts = self
            .drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(drafts.entry(project.to_string()).or_default())
    }

    /// Drops the draft when the user navigates away from the scan view;
    /// nothing is persisted client-side.
    pub fn discard_draft(&self, project: &str) {
        let mut drafts = self
            .drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        drafts.remove(project);
    }

    pub fn with_upload_slot<T>(&self, project: &str, f: impl FnOnce(&mut UploadSlot) -> T) -> T {
        let mut uploads = self
            .uploads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(uploads.entry(project.to_string()).or_default())
    }

    pub fn set_upload_phase(&self, project: &str, phase: UploadPhase) {
        self.with_upload_slot(project, |slot| slot.phase = phase);
    }

    /// Claims the upload slot for one run. The busy check and the switch to
    /// `Uploading` happen under the same lock, so two rapid submissions can
    /// never both pass the check. Returns the staged files to submit.
    pub fn begin_upload(&self, project: &str) -> Result<Vec<PendingFile>, AppError> {
        self.with_upload_slot(project, |slot| {
            if slot.phase.is_busy() {
                return Err(AppError::validation("An upload is already in progress."));
            }
            if slot.pending.is_empty() {
                return Err(AppError::validation("Select at least one file."));
            }
            slot.phase = UploadPhase::Uploading;
            Ok(slot.pending.clone())
        })
    }

    /// Records a visited path; consecutive duplicates collapse so refreshes
    /// do not pollute back-navigation.
    pub fn visit_path(&self, path: &str) {
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if history.last().map(|p| p.as_str()) != Some(path) {
            history.push(path.to_string());
        }
    }

    pub fn history_snapshot(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Removes the current path from the top of the history, leaving the
    /// page being navigated back to as the new top.
    pub fn pop_path(&self, current: &str) {
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if history.last().map(|p| p.as_str()) == Some(current) {
            history.pop();
        }
    }
}
