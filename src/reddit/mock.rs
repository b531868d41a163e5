use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::client::ContentSource;
use super::error::RedditError;
use super::model::Post;
use crate::constants::clamp_limit;

/// A retrieval the mock observed, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalCall {
    Latest {
        subreddit: String,
        limit: i64,
    },
    Search {
        subreddit: String,
        query: String,
        limit: i64,
    },
}

impl RetrievalCall {
    pub fn subreddit(&self) -> &str {
        match self {
            RetrievalCall::Latest { subreddit, .. } | RetrievalCall::Search { subreddit, .. } => {
                subreddit
            }
        }
    }
}

#[derive(Default)]
struct MockState {
    posts: HashMap<String, Vec<Post>>,
    failures: HashMap<String, u16>,
    delays: HashMap<String, Duration>,
    calls: Vec<RetrievalCall>,
}

/// In-memory [`ContentSource`] that serves canned posts per subreddit.
///
/// Unknown subreddits yield an empty listing. Clones share state.
#[derive(Default, Clone)]
pub struct MockContentSource {
    state: Arc<Mutex<MockState>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `posts` for `subreddit` in both latest and search mode.
    pub fn with_posts(self, subreddit: &str, posts: Vec<Post>) -> Self {
        self.state.lock().posts.insert(subreddit.to_string(), posts);
        self
    }

    /// Makes every retrieval for `subreddit` fail with `status`.
    pub fn with_failure(self, subreddit: &str, status: u16) -> Self {
        self.state
            .lock()
            .failures
            .insert(subreddit.to_string(), status);
        self
    }

    /// Delays every retrieval for `subreddit`.
    pub fn with_delay(self, subreddit: &str, delay: Duration) -> Self {
        self.state.lock().delays.insert(subreddit.to_string(), delay);
        self
    }

    /// Retrievals observed so far.
    pub fn calls(&self) -> Vec<RetrievalCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    async fn serve(&self, call: RetrievalCall, limit: i64) -> Result<Vec<Post>, RedditError> {
        let subreddit = call.subreddit().to_string();
        let delay = {
            let mut state = self.state.lock();
            state.calls.push(call);
            state.delays.get(&subreddit).copied()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock();
        if let Some(&status) = state.failures.get(&subreddit) {
            return Err(RedditError::UnexpectedStatus {
                status,
                body: format!("mock failure for r/{subreddit}"),
            });
        }

        let limit = clamp_limit(limit) as usize;
        Ok(state
            .posts
            .get(&subreddit)
            .map(|posts| posts.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

impl ContentSource for MockContentSource {
    async fn list_latest(&self, subreddit: &str, limit: i64) -> Result<Vec<Post>, RedditError> {
        let call = RetrievalCall::Latest {
            subreddit: subreddit.to_string(),
            limit,
        };
        self.serve(call, limit).await
    }

    async fn search(
        &self,
        subreddit: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Post>, RedditError> {
        let call = RetrievalCall::Search {
            subreddit: subreddit.to_string(),
            query: query.to_string(),
            limit,
        };
        self.serve(call, limit).await
    }
}
