use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ServiceError;
use crate::form::payload::{SavePrioritiesRequest, SubmissionPayload};
use crate::render::GenerateResponse;

/// The timetable server, seen as an opaque request/response collaborator.
/// No call is retried automatically; the user re-triggers by acting again.
#[allow(async_fn_in_trait)]
pub trait ScheduleService {
    /// Ordered subject names for a (class, semester) pair.
    async fn fetch_subjects(
        &self,
        class_name: &str,
        semester: &str,
    ) -> Result<Vec<String>, ServiceError>;

    /// Submits the assembled form payload and returns the server's verdict.
    async fn generate(&self, payload: &SubmissionPayload)
        -> Result<GenerateResponse, ServiceError>;

    /// Persists a priority ranking ahead of the credits step. Returns the
    /// server's success flag.
    async fn save_priorities(&self, request: &SavePrioritiesRequest)
        -> Result<bool, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
}

/// HTTP implementation against the timetable server's routes.
pub struct HttpScheduleService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpScheduleService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ScheduleService for HttpScheduleService {
    async fn fetch_subjects(
        &self,
        class_name: &str,
        semester: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let response = self
            .client
            .get(self.url("/subjects"))
            .query(&[("class_name", class_name), ("semester", semester)])
            .send()
            .await?;

        let status = response.status();
        debug!("subjects query for {} {}: {}", class_name, semester, status);
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }

        Ok(response.json().await?)
    }

    async fn generate(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<GenerateResponse, ServiceError> {
        let response = self
            .client
            .post(self.url("/generate"))
            .form(&payload.form_fields())
            .send()
            .await?;

        debug!("generate request: {}", response.status());

        // Infeasible-timetable rejections ride on 4xx statuses with an error
        // body, so the body is decoded regardless of status.
        let body: Value = response.json().await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn save_priorities(
        &self,
        request: &SavePrioritiesRequest,
    ) -> Result<bool, ServiceError> {
        let response = self
            .client
            .post(self.url("/save_priorities"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!("save_priorities request: {}", status);
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }

        let body: SaveResponse = response.json().await?;
        Ok(body.success)
    }
}
