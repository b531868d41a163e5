use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reddit::Post;

/// How posts are retrieved for every subreddit in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Subreddit search with the topic as query.
    Search,
    /// Newest posts, ignoring the topic.
    Latest,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Search => "search",
            SearchMethod::Latest => "latest",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSearchMethod(pub String);

impl fmt::Display for UnknownSearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown search method '{}': expected 'search' or 'latest'",
            self.0
        )
    }
}

impl std::error::Error for UnknownSearchMethod {}

impl FromStr for SearchMethod {
    type Err = UnknownSearchMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(SearchMethod::Search),
            "latest" => Ok(SearchMethod::Latest),
            other => Err(UnknownSearchMethod(other.to_string())),
        }
    }
}

/// Optional post-retrieval narrowing. The default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Keep posts created at or after this instant.
    pub created_after: Option<DateTime<Utc>>,
    /// Keep posts with at least this many comments. Values `<= 0` disable the check.
    pub min_num_comments: i64,
}

impl PostFilter {
    pub fn is_empty(&self) -> bool {
        self.created_after.is_none() && self.min_num_comments <= 0
    }

    pub fn matches(&self, post: &Post) -> bool {
        if let Some(after) = self.created_after
            && post.created_at < after
        {
            return false;
        }
        self.min_num_comments <= 0 || post.num_comments >= self.min_num_comments
    }

    /// Drops non-matching posts, keeping retrieval order.
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        if self.is_empty() {
            return posts;
        }
        posts.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub topic: String,
    /// Processed in order; may be empty.
    pub subreddits: Vec<String>,
    /// Inclusive lower bound on the similarity score. `0.0` is a real threshold.
    pub threshold: f64,
    /// Per-subreddit limit, clamped by the content source.
    pub limit: i64,
    pub search_method: SearchMethod,
    pub filter: PostFilter,
}

impl EvaluationRequest {
    pub fn new(topic: impl Into<String>, search_method: SearchMethod) -> Self {
        Self {
            topic: topic.into(),
            subreddits: Vec::new(),
            threshold: 0.0,
            limit: 0,
            search_method,
            filter: PostFilter::default(),
        }
    }

    pub fn with_subreddits<I, S>(mut self, subreddits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subreddits = subreddits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, filter: PostFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Classification of one post against the topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceResult {
    /// Cosine similarity between post and topic embeddings.
    pub score: f64,
    pub is_relevant: bool,
    /// One-sentence justification from the chat model.
    pub explanation: String,
}

/// A post together with its source subreddit and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedPost {
    /// Subreddit as named in the request.
    pub subreddit_name: String,
    pub post: Post,
    pub result: RelevanceResult,
}
