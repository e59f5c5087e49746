//! `reqwest`-backed implementation of the exam-take API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::types::{SaveResult, StartResponse, SubmitResult};
use crate::api::TakeApi;
use crate::config::SessionConfig;
use crate::error::{ApiError, ConfigError};
use crate::exam::AnswersState;

/// HTTP client for the exam-take endpoint.
///
/// All four tasks POST a JSON body with a `task` discriminator to the same
/// URL. The client is built once with a request timeout; the transport's
/// timeout is the only one this layer imposes.
pub struct HttpTakeApi {
    url: Url,
    client: reqwest::Client,
}

impl HttpTakeApi {
    /// Build a client for the configured exam-take URL.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        Self::with_timeout(config.take_url().clone(), config.request_timeout())
    }

    /// Build a client with an explicit timeout (mostly for tests).
    pub fn with_timeout(url: Url, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(HttpTakeApi { url, client })
    }

    async fn post_task<T: DeserializeOwned>(
        &self,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(text) if !text.trim().is_empty() => text,
                _ => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::UnexpectedPayload(e.to_string()))
    }
}

#[async_trait]
impl TakeApi for HttpTakeApi {
    async fn start(&self) -> Result<StartResponse, ApiError> {
        self.post_task(serde_json::json!({ "task": "start" })).await
    }

    async fn save_snapshot(&self, answers: &AnswersState) -> Result<SaveResult, ApiError> {
        self.post_task(serde_json::json!({
            "task": "snapshot",
            "answers": answers,
        }))
        .await
    }

    async fn submit(&self, answers: &AnswersState) -> Result<SubmitResult, ApiError> {
        self.post_task(serde_json::json!({
            "task": "submit",
            "answers": answers,
        }))
        .await
    }

    async fn report_anomaly(&self, reason: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({
                "task": "anomaly",
                "anomaly": { "reason": reason },
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }
        Ok(())
    }
}
