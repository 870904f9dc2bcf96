use serde::{Deserialize, Serialize};

/// A file staged for upload, before anything is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFile {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
}

/// Observable step of the two-call upload flow. There is no cancellation
/// once `Uploading` begins; `Error` is recoverable and resets to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

impl UploadPhase {
    pub fn is_busy(self) -> bool {
        matches!(self, UploadPhase::Uploading | UploadPhase::Processing)
    }
}
