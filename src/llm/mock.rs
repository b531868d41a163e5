use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::client::LanguageModel;
use super::error::LlmError;
use super::model::{ChatMessage, has_user_message};

/// Embedding returned for texts without an explicit mapping.
pub const MOCK_DEFAULT_EMBEDDING: [f32; 3] = [1.0, 0.0, 0.0];

struct MockState {
    embeddings: HashMap<String, Vec<f32>>,
    default_embedding: Vec<f32>,
    embedding_failures: HashSet<String>,
    fail_all_embeddings: bool,
    embed_delays: HashMap<String, Duration>,
    chat_reply: Option<String>,
    fail_chat: bool,
    embed_calls: Vec<String>,
    chat_calls: Vec<Vec<ChatMessage>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            embeddings: HashMap::new(),
            default_embedding: MOCK_DEFAULT_EMBEDDING.to_vec(),
            embedding_failures: HashSet::new(),
            fail_all_embeddings: false,
            embed_delays: HashMap::new(),
            chat_reply: None,
            fail_chat: false,
            embed_calls: Vec::new(),
            chat_calls: Vec::new(),
        }
    }
}

/// Deterministic [`LanguageModel`] with per-text embeddings and call recording.
///
/// Chat replies default to `"Mock summary #<n>"` (1-based call count). Clones share state.
#[derive(Default, Clone)]
pub struct MockLanguageModel {
    state: Arc<Mutex<MockState>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `embedding` whenever `text` is embedded.
    pub fn with_embedding(self, text: &str, embedding: Vec<f32>) -> Self {
        self.state
            .lock()
            .embeddings
            .insert(text.to_string(), embedding);
        self
    }

    /// Embedding used for unmapped texts.
    pub fn with_default_embedding(self, embedding: Vec<f32>) -> Self {
        self.state.lock().default_embedding = embedding;
        self
    }

    /// Fails embedding requests for exactly `text`.
    pub fn with_embedding_failure(self, text: &str) -> Self {
        self.state
            .lock()
            .embedding_failures
            .insert(text.to_string());
        self
    }

    /// Fails every embedding request.
    pub fn with_all_embeddings_failing(self) -> Self {
        self.state.lock().fail_all_embeddings = true;
        self
    }

    /// Delays embedding requests for exactly `text`.
    pub fn with_embedding_delay(self, text: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .embed_delays
            .insert(text.to_string(), delay);
        self
    }

    /// Fixed reply for every chat request.
    pub fn with_chat_reply(self, reply: &str) -> Self {
        self.state.lock().chat_reply = Some(reply.to_string());
        self
    }

    /// Fails every chat request.
    pub fn with_chat_failure(self) -> Self {
        self.state.lock().fail_chat = true;
        self
    }

    /// Texts embedded so far, in call order.
    pub fn embed_calls(&self) -> Vec<String> {
        self.state.lock().embed_calls.clone()
    }

    /// Conversations sent so far, in call order.
    pub fn chat_calls(&self) -> Vec<Vec<ChatMessage>> {
        self.state.lock().chat_calls.clone()
    }

    pub fn embed_call_count(&self) -> usize {
        self.state.lock().embed_calls.len()
    }

    pub fn chat_call_count(&self) -> usize {
        self.state.lock().chat_calls.len()
    }
}

impl LanguageModel for MockLanguageModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let delay = {
            let mut state = self.state.lock();
            state.embed_calls.push(text.to_string());
            state.embed_delays.get(text).copied()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock();
        if state.fail_all_embeddings || state.embedding_failures.contains(text) {
            return Err(LlmError::UnexpectedStatus {
                status: 503,
                body: "mock embedding failure".to_string(),
            });
        }

        Ok(state
            .embeddings
            .get(text)
            .cloned()
            .unwrap_or_else(|| state.default_embedding.clone()))
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        if !has_user_message(messages) {
            return Err(LlmError::NoUserMessage);
        }

        let mut state = self.state.lock();
        state.chat_calls.push(messages.to_vec());
        if state.fail_chat {
            return Err(LlmError::UnexpectedStatus {
                status: 500,
                body: "mock chat failure".to_string(),
            });
        }

        let n = state.chat_calls.len();
        Ok(state
            .chat_reply
            .clone()
            .unwrap_or_else(|| format!("Mock summary #{n}")))
    }
}
