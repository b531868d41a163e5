use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{error, info, instrument};

use relevance::llm::LanguageModel;
use relevance::reddit::ContentSource;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{RelevanceRequestDto, RelevanceResponseDto};
use crate::gateway::state::HandlerState;

#[instrument(
    skip(state, payload),
    fields(topic = tracing::field::Empty, search_method = tracing::field::Empty)
)]
pub async fn relevance_search_handler<C, L>(
    State(state): State<HandlerState<C, L>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RelevanceResponseDto>, GatewayError>
where
    C: ContentSource + 'static,
    L: LanguageModel + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        error!(error = %rejection.body_text(), "Error reading request body");
        GatewayError::InvalidRequest(rejection.body_text())
    })?;
    let request: RelevanceRequestDto = serde_json::from_value(request).map_err(|e| {
        error!(error = %e, "Error binding request");
        GatewayError::InvalidRequest(format!("Invalid request schema: {}", e))
    })?;
    let request = request.into_evaluation_request()?;

    let span = tracing::Span::current();
    span.record("topic", tracing::field::display(&request.topic));
    span.record("search_method", tracing::field::display(request.search_method));

    info!(
        subreddits = ?request.subreddits,
        threshold = request.threshold,
        limit = request.limit,
        "Searching Reddit posts"
    );

    let result = match state.request_timeout {
        Some(timeout) => state.pipeline.run_with_deadline(&request, timeout).await,
        None => state.pipeline.run(&request).await,
    };

    let posts = result.map_err(|e| {
        error!(error = %e, stage = e.stage(), "Error searching Reddit posts");
        GatewayError::from(e)
    })?;

    Ok(Json(RelevanceResponseDto::from(posts)))
}
