//! Relevance evaluation: topic embedding, retrieval, per-post scoring and explanation.
//!
//! [`RelevancePipeline`] drives a run; [`RelevanceEvaluator`] handles a single post.

pub mod error;
pub mod evaluator;
pub mod pipeline;
pub mod prompt;
pub mod types;


pub use error::{
    ErrorKind, EvaluationError, RelevanceError, STAGE_ITEM_EMBEDDING, STAGE_RELEVANCE_SUMMARY,
    STAGE_SUBREDDIT_POSTS, STAGE_TOPIC_EMBEDDING,
};
pub use evaluator::RelevanceEvaluator;
pub use pipeline::RelevancePipeline;
pub use prompt::{SummaryContext, evaluation_text, summary_prompt};
pub use types::{
    EvaluatedPost, EvaluationRequest, PostFilter, RelevanceResult, SearchMethod,
    UnknownSearchMethod,
};
