//! HTTP client helpers for tests.

#![allow(dead_code)]

use std::time::Duration;

use relevance_server::gateway::{
    ErrorResponse, HealthResponse, RELEVANCE_SEARCH_PATH, RELEVANCE_STAGE_HEADER,
    RelevanceResponseDto,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn search(
        &self,
        request: &serde_json::Value,
    ) -> Result<RelevanceResponseDto, TestClientError> {
        let resp = self
            .client
            .post(self.url(RELEVANCE_SEARCH_PATH))
            .json(request)
            .send()
            .await?;

        let stage = resp
            .headers()
            .get(RELEVANCE_STAGE_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 | 415 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body: ErrorResponse = resp.json().await?;
                Err(TestClientError::ServerError {
                    status,
                    stage,
                    body,
                })
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error {status} at stage {stage}: {}", .body.error)]
    ServerError {
        status: u16,
        stage: String,
        body: ErrorResponse,
    },
}
