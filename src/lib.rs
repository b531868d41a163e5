//! Reddit relevance library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! - [`RelevancePipeline`], [`RelevanceEvaluator`] - topic embedding, retrieval,
//!   scoring and explanation
//! - [`EvaluationRequest`], [`EvaluatedPost`], [`RelevanceResult`] - run input and output
//! - [`ContentSource`], [`RedditClient`] - subreddit listings and search
//! - [`LanguageModel`], [`OpenAiCompatClient`] - embeddings and chat completions
//! - [`cosine_similarity`] - vector similarity used for scoring
//! - [`Config`], [`ConfigError`] - environment-backed settings
//!
//! ## Test/Mock Support
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod llm;
pub mod reddit;
pub mod relevance;
pub mod similarity;

pub use config::{Config, ConfigError, LogFormat};
pub use constants::clamp_limit;
#[cfg(any(test, feature = "mock"))]
pub use llm::MockLanguageModel;
pub use llm::{ChatMessage, LanguageModel, LlmError, OpenAiCompatClient};
#[cfg(any(test, feature = "mock"))]
pub use reddit::MockContentSource;
pub use reddit::{ContentSource, Post, RedditClient, RedditError};
pub use relevance::{
    ErrorKind, EvaluatedPost, EvaluationError, EvaluationRequest, PostFilter, RelevanceError,
    RelevanceEvaluator, RelevancePipeline, RelevanceResult, SearchMethod,
};
pub use similarity::cosine_similarity;
