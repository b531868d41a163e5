//! Wire shapes for `POST /v1/reddit/relevance/search`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relevance::relevance::{EvaluatedPost, EvaluationRequest, PostFilter, SearchMethod};

use super::error::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceRequestDto {
    pub topic: String,
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default)]
    pub relevance_threshold: f64,
    /// Per-subreddit limit; `<= 0` means the default of 25.
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub min_num_comments: i64,
    pub search_method: SearchMethod,
}

impl RelevanceRequestDto {
    /// Validates the DTO and converts it into a pipeline request.
    pub fn into_evaluation_request(self) -> Result<EvaluationRequest, GatewayError> {
        if self.topic.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "topic must not be blank".to_string(),
            ));
        }

        if !self.relevance_threshold.is_finite() {
            return Err(GatewayError::InvalidRequest(
                "relevance_threshold must be a finite number".to_string(),
            ));
        }

        let mut subreddits = Vec::with_capacity(self.subreddits.len());
        for name in self.subreddits {
            let name = name.trim().trim_start_matches("r/");
            if name.is_empty() {
                return Err(GatewayError::InvalidRequest(
                    "subreddit names must not be blank".to_string(),
                ));
            }
            subreddits.push(name.to_string());
        }

        Ok(EvaluationRequest::new(self.topic, self.search_method)
            .with_subreddits(subreddits)
            .with_threshold(self.relevance_threshold)
            .with_limit(self.limit)
            .with_filter(PostFilter {
                created_after: self.created_after,
                min_num_comments: self.min_num_comments,
            }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevanceResponseDto {
    pub posts: Vec<SubredditPostDto>,
}

impl From<Vec<EvaluatedPost>> for RelevanceResponseDto {
    fn from(posts: Vec<EvaluatedPost>) -> Self {
        Self {
            posts: posts.into_iter().map(SubredditPostDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubredditPostDto {
    pub subreddit_name: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_at: DateTime<Utc>,
    pub is_relevant: bool,
    pub relevance_score: f64,
    pub relevance_summary: String,
}

impl From<EvaluatedPost> for SubredditPostDto {
    fn from(evaluated: EvaluatedPost) -> Self {
        let EvaluatedPost {
            subreddit_name,
            post,
            result,
        } = evaluated;

        Self {
            subreddit_name,
            title: post.title,
            content: post.body,
            url: post.url,
            score: post.score,
            num_comments: post.num_comments,
            created_at: post.created_at,
            is_relevant: result.is_relevant,
            relevance_score: result.score,
            relevance_summary: result.explanation,
        }
    }
}
