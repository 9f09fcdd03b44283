use crate::domain::model::{JobId, JobStatus, StatOutcome};
use crate::domain::ports::RemoteStore;
use crate::utils::error::{FerryError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.dropboxapi.com";

/// `save_url` may answer with an immediate `complete` tag instead of an
/// async job id; this reserved id short-circuits the status check.
pub const SYNC_COMPLETE_JOB: &str = "complete";

/// `RemoteStore` over the Dropbox HTTP RPC API. The base URL is injectable
/// so tests can point it at a mock server.
pub struct DropboxStore {
    client: Client,
    base_url: String,
    token: String,
}

impl DropboxStore {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    async fn rpc(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> std::result::Result<Response, reqwest::Error> {
        self.client
            .post(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
    }

    // Dropbox rejects trailing slashes and wants the root as "".
    fn api_path(path: &str) -> &str {
        let trimmed = path.trim_end_matches('/');
        if trimmed == "/" {
            ""
        } else {
            trimmed
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    entries: Vec<ListEntry>,
    cursor: String,
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
}

#[async_trait]
impl RemoteStore for DropboxStore {
    async fn stat(&self, path: &str) -> StatOutcome {
        let response = match self
            .rpc("/2/files/get_metadata", json!({ "path": Self::api_path(path) }))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("get_metadata transport failure: {}", e);
                return StatOutcome::Transient;
            }
        };

        match response.status() {
            status if status.is_success() => StatOutcome::Found,
            StatusCode::TOO_MANY_REQUESTS => StatOutcome::RateLimited,
            StatusCode::CONFLICT => {
                // 409 carries a structured error; only path/not_found means
                // the object is absent.
                match response.text().await {
                    Ok(body) if body.contains("not_found") => StatOutcome::NotFound,
                    Ok(_) => StatOutcome::Transient,
                    Err(_) => StatOutcome::Transient,
                }
            }
            status => {
                tracing::debug!("get_metadata returned {}", status);
                StatOutcome::Transient
            }
        }
    }

    async fn list_children(&self, path: &str) -> Result<Vec<String>> {
        let mut response = self
            .rpc("/2/files/list_folder", json!({ "path": Self::api_path(path) }))
            .await?;

        let mut names = Vec::new();
        loop {
            if !response.status().is_success() {
                return Err(FerryError::RemoteError {
                    message: format!("list_folder returned {}", response.status()),
                });
            }
            let page: ListFolderResponse = response.json().await?;
            names.extend(page.entries.into_iter().map(|e| e.name));
            if !page.has_more {
                break;
            }
            response = self
                .rpc("/2/files/list_folder/continue", json!({ "cursor": page.cursor }))
                .await?;
        }
        Ok(names)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.rpc("/2/files/delete_v2", json!({ "path": path })).await?;
        if !response.status().is_success() {
            return Err(FerryError::RemoteError {
                message: format!("delete_v2 returned {} for {}", response.status(), path),
            });
        }
        Ok(())
    }

    async fn copy_from_url(&self, dest: &str, source: &str) -> Result<JobId> {
        let response = self
            .rpc("/2/files/save_url", json!({ "path": dest, "url": source }))
            .await?;
        if !response.status().is_success() {
            return Err(FerryError::RemoteError {
                message: format!("save_url returned {}", response.status()),
            });
        }

        let body: serde_json::Value = response.json().await?;
        match body.get(".tag").and_then(|t| t.as_str()) {
            Some("async_job_id") => body
                .get("async_job_id")
                .and_then(|id| id.as_str())
                .map(|id| JobId(id.to_string()))
                .ok_or_else(|| FerryError::RemoteError {
                    message: "save_url response missing async_job_id".to_string(),
                }),
            Some("complete") => Ok(JobId(SYNC_COMPLETE_JOB.to_string())),
            tag => Err(FerryError::RemoteError {
                message: format!("unexpected save_url tag: {:?}", tag),
            }),
        }
    }

    async fn job_status(&self, job: &JobId) -> Result<JobStatus> {
        if job.as_str() == SYNC_COMPLETE_JOB {
            return Ok(JobStatus::Complete);
        }

        let response = self
            .rpc(
                "/2/files/save_url/check_job_status",
                json!({ "async_job_id": job.as_str() }),
            )
            .await?;
        if !response.status().is_success() {
            return Err(FerryError::RemoteError {
                message: format!("check_job_status returned {}", response.status()),
            });
        }

        let body: serde_json::Value = response.json().await?;
        match body.get(".tag").and_then(|t| t.as_str()) {
            Some("in_progress") => Ok(JobStatus::Pending),
            Some("complete") => Ok(JobStatus::Complete),
            Some("failed") => Ok(JobStatus::Failed),
            tag => {
                tracing::warn!("Unknown check_job_status tag {:?}, treating as pending", tag);
                Ok(JobStatus::Pending)
            }
        }
    }
}
