//! HTTP gateway (Axum) for relevance evaluation.
//!
//! This module is primarily used by the `relevance` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError, RELEVANCE_STAGE_HEADER};
pub use handler::relevance_search_handler;
pub use payload::{RelevanceRequestDto, RelevanceResponseDto, SubredditPostDto};
pub use state::HandlerState;

use relevance::llm::LanguageModel;
use relevance::reddit::ContentSource;

pub const RELEVANCE_SEARCH_PATH: &str = "/v1/reddit/relevance/search";

pub fn create_router_with_state<C, L>(state: HandlerState<C, L>) -> Router
where
    C: ContentSource + 'static,
    L: LanguageModel + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route(RELEVANCE_SEARCH_PATH, post(relevance_search_handler::<C, L>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
