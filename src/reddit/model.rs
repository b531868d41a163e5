use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by `/r/{sub}/.json` and `/r/{sub}/search.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub data: PostData,
}

/// Raw post fields as Reddit serialises them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    /// Epoch seconds (Reddit sends a float).
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub permalink: String,
    /// Pinned / community highlight.
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub subreddit: String,
}

impl Listing {
    /// Consumes the envelope, yielding posts in listing order.
    pub fn into_posts(self) -> Vec<Post> {
        self.data
            .children
            .into_iter()
            .map(|child| Post::from(child.data))
            .collect()
    }
}

/// One retrieved content item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Self text; empty for link posts.
    pub body: String,
    /// Subreddit the post was published in, as reported by Reddit.
    pub subreddit: String,
    pub url: String,
    pub permalink: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_at: DateTime<Utc>,
    pub stickied: bool,
}

impl From<PostData> for Post {
    fn from(data: PostData) -> Self {
        Self {
            created_at: epoch_seconds_to_utc(data.created_utc),
            title: data.title,
            body: data.selftext,
            subreddit: data.subreddit,
            url: data.url,
            permalink: data.permalink,
            score: data.score,
            num_comments: data.num_comments,
            stickied: data.stickied,
        }
    }
}

/// Truncates fractional seconds; out-of-range values map to the Unix epoch.
pub fn epoch_seconds_to_utc(secs: f64) -> DateTime<Utc> {
    if !secs.is_finite() {
        return DateTime::<Utc>::default();
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0).unwrap_or_default()
}
