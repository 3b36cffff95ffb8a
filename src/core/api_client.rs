// src/core/api_client.rs
//! Unified HTTP client for the Jobs API - JSON for listing and prediction,
//! multipart form data for dataset uploads

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::types::{
    job::JobRecord,
    response::{SalaryPredictionRequest, SalaryPredictionResponse, UploadResponse},
};

const JOBS_ENDPOINT: &str = "/jobs";
const PREDICT_SALARY_ENDPOINT: &str = "/predict-salary";
const UPLOAD_ENDPOINT: &str = "/upload";

/// Fixed page size for job listings. Single-page fetch, no pagination cursor.
pub const JOBS_PAGE_LIMIT: u32 = 12;

/// The three operations the dashboard performs against the backend.
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn list_jobs(&self, skill_filter: &str) -> Result<Vec<JobRecord>>;

    async fn predict_salary(
        &self,
        request: &SalaryPredictionRequest,
    ) -> Result<SalaryPredictionResponse>;

    async fn upload_dataset(&self, path: &Path) -> Result<UploadResponse>;
}

pub struct JobsApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobsApiClient {
    /// Create a new client from injected configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Query parameters for one listing request: the page limit is always
/// present, the skill constraint only when the filter is non-empty. The
/// backend does the filtering; the client never filters locally.
pub fn jobs_query(skill_filter: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", JOBS_PAGE_LIMIT.to_string())];
    if !skill_filter.is_empty() {
        params.push(("skill", skill_filter.to_string()));
    }
    params
}

/// Content type for an upload. Only CSV datasets are accepted.
fn content_type_for(file_name: &str) -> Result<&'static str> {
    if file_name.to_lowercase().ends_with(".csv") {
        Ok("text/csv")
    } else {
        anyhow::bail!("Unsupported file format: {}. Expected a .csv file", file_name)
    }
}

#[async_trait]
impl JobsApi for JobsApiClient {
    /// 1. Job listing - GET /jobs, optionally constrained by skill
    async fn list_jobs(&self, skill_filter: &str) -> Result<Vec<JobRecord>> {
        let request_id = Uuid::new_v4();
        let url = self.url(JOBS_ENDPOINT);

        debug!(%request_id, "Calling job listing service: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&jobs_query(skill_filter))
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        debug!(%request_id, "Response status: {}", status);

        if status.is_success() {
            response
                .json::<Vec<JobRecord>>()
                .await
                .context("Failed to parse job listing response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Job listing failed with status {}: {}", status, error_text)
        }
    }

    /// 2. Salary prediction - POST /predict-salary with rating + skill tokens
    async fn predict_salary(
        &self,
        request: &SalaryPredictionRequest,
    ) -> Result<SalaryPredictionResponse> {
        let request_id = Uuid::new_v4();
        let url = self.url(PREDICT_SALARY_ENDPOINT);

        info!(%request_id, "Calling salary prediction service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to call salary prediction service")?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<SalaryPredictionResponse>()
                .await
                .context("Failed to parse salary prediction response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!(
                "Salary prediction failed with status {}: {}",
                status,
                error_text
            )
        }
    }

    /// 3. Dataset upload - POST /upload, one file per invocation under the
    /// fixed `file` field. The backend answers with a message body on success
    /// and failure alike; whatever decodes as a message is surfaced.
    async fn upload_dataset(&self, path: &Path) -> Result<UploadResponse> {
        let request_id = Uuid::new_v4();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
            .to_string();
        let content_type = content_type_for(&file_name)?;
        let url = self.url(UPLOAD_ENDPOINT);

        let file_content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let form = Form::new().part(
            "file",
            Part::bytes(file_content)
                .file_name(file_name)
                .mime_str(content_type)
                .context("Failed to create multipart")?,
        );

        info!(%request_id, "Calling dataset upload service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        serde_json::from_str::<UploadResponse>(&response_text).with_context(|| {
            format!("Failed to parse upload response. Raw response: {}", response_text)
        })
    }
}
