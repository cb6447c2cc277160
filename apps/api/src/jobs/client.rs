/// Job API client: the single point of entry for calls to the external
/// Job/Resume API (listing, details, resume analysis, matching, refresh).
///
/// Handlers depend on the `JobBoard` trait, never on `JobApiClient` directly,
/// so the upstream can be swapped or stubbed.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::JobPosting;
use crate::models::resume::ResumeAnalysis;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum JobApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode Job API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Job {0} not found")]
    NotFound(String),
}

/// A resume file on its way to the analyzer.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The Job/Resume API as seen by the rest of the service.
///
/// Carried in `AppState` as `Arc<dyn JobBoard>`.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Lists jobs, optionally filtered by a search string, in upstream order.
    async fn fetch_jobs(&self, search: Option<&str>, limit: u32)
        -> Result<Vec<JobPosting>, JobApiError>;

    async fn job_details(&self, job_id: &str) -> Result<JobPosting, JobApiError>;

    async fn analyze_resume(&self, upload: ResumeUpload) -> Result<ResumeAnalysis, JobApiError>;

    /// Returns jobs ranked against the resume text, carrying match scores.
    async fn match_jobs(&self, resume_text: &str) -> Result<Vec<JobPosting>, JobApiError>;

    async fn refresh_jobs(&self) -> Result<(), JobApiError>;
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    resume_text: &'a str,
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// reqwest-backed `JobBoard` talking to the Job API over HTTP.
#[derive(Clone)]
pub struct JobApiClient {
    client: Client,
    base_url: String,
}

impl JobApiClient {
    pub fn new(base_url: &str) -> Result<Self, JobApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request built by `build`, retrying connection failures,
    /// 429 and 5xx with exponential backoff. Other failures return at once.
    async fn send<F>(&self, build: F) -> Result<Response, JobApiError>
    where
        F: Fn() -> Result<RequestBuilder, JobApiError>,
    {
        let mut last_error: Option<JobApiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Job API attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match build()?.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JobApiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Job API returned {}: {}", status, body);
                last_error = Some(JobApiError::Api {
                    status: status.as_u16(),
                    message: error_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(JobApiError::Api {
                    status: status.as_u16(),
                    message: error_message(body),
                });
            }

            return Ok(response);
        }

        Err(last_error.unwrap_or(JobApiError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: format!("gave up after {MAX_RETRIES} attempts"),
        }))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, JobApiError> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl JobBoard for JobApiClient {
    async fn fetch_jobs(
        &self,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<JobPosting>, JobApiError> {
        let url = self.url("/jobs");
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }

        let response = self
            .send(|| Ok(self.client.get(&url).query(&query)))
            .await?;
        let jobs: Vec<JobPosting> = Self::decode(response).await?;

        debug!("Fetched {} jobs (search={:?}, limit={})", jobs.len(), search, limit);
        Ok(jobs)
    }

    async fn job_details(&self, job_id: &str) -> Result<JobPosting, JobApiError> {
        let url = self.url(&format!("/job/{job_id}"));

        match self.send(|| Ok(self.client.get(&url))).await {
            Ok(response) => Self::decode(response).await,
            Err(JobApiError::Api { status: 404, .. }) => Err(JobApiError::NotFound(job_id.to_string())),
            Err(e) => Err(e),
        }
    }

    async fn analyze_resume(&self, upload: ResumeUpload) -> Result<ResumeAnalysis, JobApiError> {
        let url = self.url("/analyze-resume");

        let response = self
            .send(|| {
                let mut part = multipart::Part::stream(upload.bytes.clone())
                    .file_name(upload.file_name.clone());
                if let Some(content_type) = &upload.content_type {
                    part = part.mime_str(content_type)?;
                }
                let form = multipart::Form::new().part("file", part);
                Ok(self.client.post(&url).multipart(form))
            })
            .await?;

        let analysis: ResumeAnalysis = Self::decode(response).await?;
        debug!(
            "Analyzed resume {}: {} skills, {} keywords",
            upload.file_name,
            analysis.skills.len(),
            analysis.keywords.len()
        );
        Ok(analysis)
    }

    async fn match_jobs(&self, resume_text: &str) -> Result<Vec<JobPosting>, JobApiError> {
        let url = self.url("/match-jobs");
        let body = MatchRequest { resume_text };

        let response = self
            .send(|| Ok(self.client.post(&url).json(&body)))
            .await?;
        let matches: Vec<JobPosting> = Self::decode(response).await?;

        debug!("Job API returned {} matches", matches.len());
        Ok(matches)
    }

    async fn refresh_jobs(&self) -> Result<(), JobApiError> {
        let url = self.url("/refresh-jobs");
        self.send(|| Ok(self.client.post(&url))).await?;
        Ok(())
    }
}

/// Pulls `detail` out of an error body, falling back to the raw text.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body,
    }
}
