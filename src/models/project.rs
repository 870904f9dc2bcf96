use serde::{Deserialize, Serialize};

/// A named container of uploaded documents and their scan results. The
/// name is unique and doubles as the routing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "projectName")]
    pub project_name: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub scanned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
