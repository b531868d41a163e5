use std::future::Future;
use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use tracing::{debug, error, info};

use super::error::RedditError;
use super::model::{Listing, Post};
use crate::config::Config;
use crate::constants::clamp_limit;

/// Retrieval operations the relevance pipeline consumes.
///
/// Both operations clamp `limit` with [`clamp_limit`] and return posts in the
/// order the source lists them.
pub trait ContentSource: Send + Sync {
    /// Newest posts of `subreddit`.
    fn list_latest(
        &self,
        subreddit: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Post>, RedditError>> + Send;

    /// Posts of `subreddit` matching `query`.
    fn search(
        &self,
        subreddit: &str,
        query: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Post>, RedditError>> + Send;
}

#[derive(Clone)]
/// Unauthenticated client for Reddit's public JSON listings.
pub struct RedditClient {
    http: HttpClient,
    base_url: String,
    user_agent: String,
}

impl std::fmt::Debug for RedditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RedditClient {
    /// Creates a client rooted at `base_url` (e.g. `https://www.reddit.com`).
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            base_url,
            user_agent: user_agent.into(),
        }
    }

    /// Builds a client from the `RELEVANCE_REDDIT_*` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.reddit_base_url.clone(),
            config.reddit_user_agent.clone(),
            config.reddit_timeout,
        )
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /r/{subreddit}/.json?limit=N`.
    pub async fn get_posts(&self, subreddit: &str, limit: i64) -> Result<Vec<Post>, RedditError> {
        let limit = clamp_limit(limit);
        info!(subreddit, limit, "Getting Reddit posts");

        let url = format!("{}/r/{}/.json", self.base_url, subreddit);
        let posts = self
            .fetch_listing(&url, &[("limit", limit.to_string())])
            .await
            .inspect_err(|e| error!(subreddit, error = %e, "Error getting Reddit posts"))?;

        info!(subreddit, count = posts.len(), "Reddit posts found");
        Ok(posts)
    }

    /// `GET /r/{subreddit}/search.json?q=...&restrict_sr=true&limit=N`.
    pub async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Post>, RedditError> {
        let limit = clamp_limit(limit);
        info!(subreddit, query, limit, "Searching Reddit posts");

        let url = format!("{}/r/{}/search.json", self.base_url, subreddit);
        let params = [
            ("q", query.to_string()),
            ("restrict_sr", "true".to_string()),
            ("limit", limit.to_string()),
        ];
        let posts = self
            .fetch_listing(&url, &params)
            .await
            .inspect_err(|e| error!(subreddit, query, error = %e, "Error searching Reddit posts"))?;

        info!(subreddit, count = posts.len(), "Reddit search results found");
        Ok(posts)
    }

    async fn fetch_listing(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Post>, RedditError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| RedditError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(RedditError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| RedditError::Request {
                url: url.to_string(),
                source,
            })?;

        let listing: Listing =
            serde_json::from_slice(&bytes).map_err(|e| RedditError::Decode {
                reason: e.to_string(),
            })?;

        debug!(url, bytes = bytes.len(), "Decoded Reddit listing");
        Ok(listing.into_posts())
    }
}

impl ContentSource for RedditClient {
    async fn list_latest(&self, subreddit: &str, limit: i64) -> Result<Vec<Post>, RedditError> {
        self.get_posts(subreddit, limit).await
    }

    async fn search(
        &self,
        subreddit: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Post>, RedditError> {
        self.search_posts(subreddit, query, limit).await
    }
}
