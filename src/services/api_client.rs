use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::project::{LoginOutcome, ProjectRecord};
use crate::models::results::{DocChunk, FileStatus, MatchResult};
use crate::models::scan::SearchScope;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Typed wrapper around the scan backend's HTTP API. One instance lives in
/// `AppState`; every view issues its own independent requests through it.
/// No retries and no timeouts anywhere: a failed call is surfaced to the
/// user and repeated only on explicit user action.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SynonymsResponse {
    synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
struct DocResultsResponse {
    #[serde(default)]
    results: Vec<DocChunk>,
}

#[derive(Debug, Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    statuses: Vec<FileStatus>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base = std::env::var("SMARTSCAN_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Uploads staged files as one multipart request. The backend reads the
    /// repeated `files` field.
    pub async fn upload_files(&self, files: Vec<(String, Vec<u8>)>) -> Result<String, AppError> {
        let mut form = multipart::Form::new();
        for (name, bytes) in files {
            form = form.part("files", multipart::Part::bytes(bytes).file_name(name));
        }
        let response = self
            .http
            .post(self.url("/upload-multiple"))
            .multipart(form)
            .send()
            .await?;
        self.read_message(response).await
    }

    /// Second step of the upload flow; must only run after `upload_files`
    /// succeeded.
    pub async fn process_files(&self) -> Result<String, AppError> {
        let response = self.http.post(self.url("/process-files")).send().await?;
        self.read_message(response).await
    }

    pub async fn get_synonyms(&self, keywords: &[String]) -> Result<Vec<String>, AppError> {
        let response = self
            .http
            .post(self.url("/get_synonyms"))
            .json(&json!({ "keywords": keywords }))
            .send()
            .await?;
        let body: SynonymsResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.synonyms)
    }

    /// Fire-and-forget scan trigger. `unscanned_only` picks the endpoint
    /// that skips already-scanned documents.
    pub async fn start_scan(
        &self,
        terms: &[String],
        scope: SearchScope,
        unscanned_only: bool,
    ) -> Result<String, AppError> {
        let path = if unscanned_only {
            "/search_unscanned"
        } else {
            "/search"
        };
        let response = self
            .http
            .post(self.url(path))
            .json(&json!({ "keyword": terms, "scope": scope.as_str() }))
            .send()
            .await?;
        self.read_message(response).await
    }

    pub async fn fetch_results(&self, project_name: &str) -> Result<Vec<MatchResult>, AppError> {
        let path = format!("/fetch_results/{}", urlencoding::encode(project_name));
        let response = self.http.get(self.url(&path)).send().await?;
        let body: ResultsResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.results)
    }

    pub async fn fetch_doc_results(&self, filename: &str) -> Result<Vec<DocChunk>, AppError> {
        let path = format!("/fetch_docresults/{}", urlencoding::encode(filename));
        let response = self.http.get(self.url(&path)).send().await?;
        let body: DocResultsResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.results)
    }

    pub async fn fetch_statuses(&self, project_name: &str) -> Result<Vec<FileStatus>, AppError> {
        let response = self
            .http
            .get(self.url("/status_data"))
            .query(&[("project_name", project_name)])
            .send()
            .await?;
        let body: StatusResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.statuses)
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>, AppError> {
        let response = self.http.get(self.url("/projects")).send().await?;
        let body: ProjectsResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.projects)
    }

    pub async fn create_project(&self, project_name: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url("/projects"))
            .json(&json!({ "projectName": project_name }))
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn delete_project(&self, project_name: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url("/delete_project"))
            .json(&json!({ "projectName": project_name }))
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    /// Registers the active project with the backend session. Upload and
    /// synonym endpoints are session-scoped server-side; everything the
    /// client routes on still carries the project name explicitly.
    pub async fn set_project_name(&self, project_name: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url("/set_project_name"))
            .json(&json!({ "projectName": project_name }))
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn delete_file(
        &self,
        project_name: &str,
        file_name: &str,
    ) -> Result<String, AppError> {
        let response = self
            .http
            .post(self.url("/delete_file"))
            .json(&json!({ "project_name": project_name, "file_name": file_name }))
            .send()
            .await?;
        self.read_message(response).await
    }

    /// Returns the raw zip bytes for a project's files.
    pub async fn download_archive(&self, project_name: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .http
            .post(self.url("/download-multiple"))
            .json(&json!({ "project_name": project_name }))
            .send()
            .await?;
        let bytes = Self::expect_ok(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let response = self
            .http
            .post(self.url("/loginUser"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let outcome: LoginOutcome = Self::expect_ok(response).await?.json().await?;
        Ok(outcome)
    }

    async fn read_message(&self, response: reqwest::Response) -> Result<String, AppError> {
        let body: MessageResponse = Self::expect_ok(response).await?.json().await?;
        Ok(body.message.unwrap_or_default())
    }

    /// Non-2xx responses surface the backend's `{"error": ...}` message when
    /// the body carries one, otherwise a plain status line.
    async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Api(extract_error_message(status, &body)).capture())
    }
}

fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn get_synonyms_posts_keywords_and_reads_synonyms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_synonyms"))
            .and(body_json(json!({ "keywords": ["machine"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "synonyms": ["apparaat"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let synonyms = client.get_synonyms(&["machine".to_string()]).await.unwrap();
        assert_eq!(synonyms, vec!["apparaat"]);
    }

    #[tokio::test]
    async fn start_scan_forwards_scope_and_picks_unscanned_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search_unscanned"))
            .and(body_json(json!({ "keyword": ["invoice"], "scope": "broad" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Search completed!" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let message = client
            .start_scan(&["invoice".to_string()], SearchScope::Broad, true)
            .await
            .unwrap();
        assert_eq!(message, "Search completed!");
    }

    #[tokio::test]
    async fn delete_file_sends_project_and_file_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/delete_file"))
            .and(body_json(
                json!({ "project_name": "X", "file_name": "a.pdf" }),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "a.pdf deleted" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let message = client.delete_file("X", "a.pdf").await.unwrap();
        assert_eq!(message, "a.pdf deleted");
    }

    #[tokio::test]
    async fn fetch_statuses_passes_project_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status_data"))
            .and(query_param("project_name", "Alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statuses": [{ "file_name": "a.pdf", "scanned": true, "scanned_time": "2025-03-01" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let statuses = client.fetch_statuses("Alpha").await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].scanned);
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_synonyms"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "model offline" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client
            .get_synonyms(&["machine".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "model offline");
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-files"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.process_files().await.unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn fetch_results_decodes_keyword_distance_pairs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fetch_results/Alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "Document Name": "a.pdf", "Keywords": [["machine", 0.31]] }
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let results = client.fetch_results("Alpha").await.unwrap();
        assert_eq!(results[0].document_name, "a.pdf");
        assert_eq!(results[0].keywords[0].0, "machine");
    }

    #[tokio::test]
    async fn login_returns_backend_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/loginUser"))
            .and(body_json(json!({ "username": "kim", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false, "message": "wrong password"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let outcome = client.login("kim", "pw").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "wrong password");
    }
}
