//! Embedding and text-generation service.
//!
//! [`LanguageModel`] is the seam the pipeline depends on. [`OpenAiCompatClient`]
//! speaks the OpenAI `/embeddings` and `/chat/completions` wire format.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{LanguageModel, OpenAiCompatClient};
pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MOCK_DEFAULT_EMBEDDING, MockLanguageModel};
pub use model::{ChatMessage, has_user_message};
