use std::future::Future;
use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::error::LlmError;
use super::model::{
    ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse, has_user_message,
};
use crate::config::Config;

/// Embedding and chat operations the relevance pipeline consumes.
pub trait LanguageModel: Send + Sync {
    /// Fixed-length embedding for `text`.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    /// Generated reply to `messages`. Fails with [`LlmError::NoUserMessage`]
    /// when no message has the `user` role.
    fn chat(&self, messages: &[ChatMessage])
    -> impl Future<Output = Result<String, LlmError>> + Send;
}

#[derive(Clone)]
/// Client for OpenAI-compatible servers (LM Studio, vLLM, OpenAI).
pub struct OpenAiCompatClient {
    http: HttpClient,
    base_url: String,
    embedding_model: String,
    chat_model: String,
}

impl std::fmt::Debug for OpenAiCompatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatClient")
            .field("base_url", &self.base_url)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

impl OpenAiCompatClient {
    /// Creates a client for `base_url` (including the `/v1` prefix).
    pub fn new(
        base_url: impl Into<String>,
        embedding_model: impl Into<String>,
        chat_model: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {key}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => tracing::warn!("Ignoring LLM API key with invalid characters: {}", e),
            }
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            embedding_model: embedding_model.into(),
            chat_model: chat_model.into(),
        }
    }

    /// Builds a client from the `RELEVANCE_LLM_*` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.llm_base_url.clone(),
            config.embedding_model.clone(),
            config.chat_model.clone(),
            config.llm_api_key.as_deref(),
            config.llm_timeout,
        )
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// `POST /embeddings` with a single input.
    pub async fn get_embedding(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        debug!(
            model = %self.embedding_model,
            text_len = text.len(),
            "Generating embedding"
        );

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            input: [text],
            model: &self.embedding_model,
        };

        let mut response: EmbeddingResponse = self
            .post_json(&url, &request)
            .await
            .inspect_err(|e| error!(error = %e, "Embedding request failed"))?;

        response.data.sort_by_key(|entry| entry.index);
        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|entry| entry.embedding)
            .ok_or(LlmError::EmptyEmbedding)?;

        debug!(dimension = embedding.len(), "Embedding generated");
        Ok(embedding)
    }

    /// `POST /chat/completions` (non-streaming); returns the first choice's content.
    pub async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        if !has_user_message(messages) {
            return Err(LlmError::NoUserMessage);
        }

        info!(
            model = %self.chat_model,
            message_count = messages.len(),
            "Sending chat request"
        );

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.chat_model,
            messages,
            stream: false,
        };

        let response: ChatResponse = self
            .post_json(&url, &request)
            .await
            .inspect_err(|e| error!(error = %e, "Chat request failed"))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::NoChoices)?
            .message
            .content
            .unwrap_or_default();

        debug!(response_len = content.len(), "Chat response received");
        Ok(content)
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, LlmError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| LlmError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(LlmError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| LlmError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| LlmError::Decode {
            reason: e.to_string(),
        })
    }
}

impl LanguageModel for OpenAiCompatClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.get_embedding(text).await
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.chat_completion(messages).await
    }
}
