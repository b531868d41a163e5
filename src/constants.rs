//! Cross-cutting, shared constants.
//!
//! Defaults here are mirrored by [`Config`](crate::config::Config); change them in one place.

/// Posts requested per subreddit when the caller asks for `limit <= 0`.
pub const DEFAULT_POST_LIMIT: u32 = 25;

/// Hard upper bound on posts requested per subreddit (Reddit listing cap).
pub const MAX_POST_LIMIT: u32 = 100;

pub const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_REDDIT_USER_AGENT: &str = "reddit-content-analyzer/1.0";
pub const DEFAULT_REDDIT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LLM_BASE_URL: &str = "http://127.0.0.1:1234/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-mxbai-embed-large-v1";
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-20b";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Role the chat endpoint requires at least once per conversation.
pub const USER_ROLE: &str = "user";

/// Clamps a caller-supplied post limit into `1..=MAX_POST_LIMIT`.
///
/// Non-positive values select [`DEFAULT_POST_LIMIT`].
///
/// ```
/// use relevance::constants::clamp_limit;
///
/// assert_eq!(clamp_limit(0), 25);
/// assert_eq!(clamp_limit(-3), 25);
/// assert_eq!(clamp_limit(10), 10);
/// assert_eq!(clamp_limit(500), 100);
/// ```
pub fn clamp_limit(limit: i64) -> u32 {
    if limit <= 0 {
        DEFAULT_POST_LIMIT
    } else if limit > i64::from(MAX_POST_LIMIT) {
        MAX_POST_LIMIT
    } else {
        limit as u32
    }
}
