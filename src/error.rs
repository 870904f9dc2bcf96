use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),

    /// Backend rejected the request; message comes from the response body.
    #[error("{0}")]
    Api(String),

    /// Caught locally, before any network call is made.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn capture(self) -> Self {
        sentry::capture_message(&self.to_string(), sentry::Level::Error);
        self
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
