use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use relevance::relevance::RelevanceError;

/// Pipeline stage that failed (`topic embedding`, `subreddit posts`, ...).
pub const RELEVANCE_STAGE_HEADER: &str = "x-relevance-stage";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Relevance(#[from] RelevanceError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Relevance(RelevanceError::DeadlineExceeded { .. }) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            GatewayError::Relevance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn stage(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "validation",
            GatewayError::Relevance(err) => err.stage(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            RELEVANCE_STAGE_HEADER,
            HeaderValue::from_str(self.stage()).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
