use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;
use crate::reddit::RedditError;

pub const STAGE_TOPIC_EMBEDDING: &str = "topic embedding";
pub const STAGE_SUBREDDIT_POSTS: &str = "subreddit posts";
pub const STAGE_ITEM_EMBEDDING: &str = "item embedding";
pub const STAGE_RELEVANCE_SUMMARY: &str = "relevance summary";
pub const STAGE_CANCELLED: &str = "cancelled";

/// Broad failure category, independent of which collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Embedding,
    Generation,
    Retrieval,
    Cancelled,
}

/// Failure while evaluating a single post.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("error getting item embedding: {0}")]
    Embedding(#[source] LlmError),

    #[error("error getting relevance summary: {0}")]
    Generation(#[source] LlmError),
}

impl EvaluationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::Embedding(_) => ErrorKind::Embedding,
            EvaluationError::Generation(_) => ErrorKind::Generation,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            EvaluationError::Embedding(_) => STAGE_ITEM_EMBEDDING,
            EvaluationError::Generation(_) => STAGE_RELEVANCE_SUMMARY,
        }
    }
}

/// Failure of a whole pipeline run. No partial results accompany it.
#[derive(Debug, Error)]
pub enum RelevanceError {
    #[error("error getting topic embedding: {0}")]
    TopicEmbedding(#[source] LlmError),

    #[error("error getting subreddit posts for r/{subreddit}: {source}")]
    Retrieval {
        subreddit: String,
        #[source]
        source: RedditError,
    },

    #[error("error evaluating post '{title}' in r/{subreddit}: {source}")]
    Evaluation {
        subreddit: String,
        title: String,
        #[source]
        source: EvaluationError,
    },

    #[error("relevance evaluation cancelled")]
    Cancelled,

    #[error("relevance evaluation exceeded deadline of {timeout:?}")]
    DeadlineExceeded { timeout: Duration },
}

impl RelevanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelevanceError::TopicEmbedding(_) => ErrorKind::Embedding,
            RelevanceError::Retrieval { .. } => ErrorKind::Retrieval,
            RelevanceError::Evaluation { source, .. } => source.kind(),
            RelevanceError::Cancelled | RelevanceError::DeadlineExceeded { .. } => {
                ErrorKind::Cancelled
            }
        }
    }

    /// Pipeline stage that failed, e.g. `"topic embedding"`.
    pub fn stage(&self) -> &'static str {
        match self {
            RelevanceError::TopicEmbedding(_) => STAGE_TOPIC_EMBEDDING,
            RelevanceError::Retrieval { .. } => STAGE_SUBREDDIT_POSTS,
            RelevanceError::Evaluation { source, .. } => source.stage(),
            RelevanceError::Cancelled | RelevanceError::DeadlineExceeded { .. } => STAGE_CANCELLED,
        }
    }
}
