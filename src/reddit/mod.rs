//! Reddit content source.
//!
//! [`ContentSource`] is the seam the pipeline depends on; [`RedditClient`] talks
//! to the public JSON listings and [`MockContentSource`] serves canned posts.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{ContentSource, RedditClient};
pub use error::RedditError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockContentSource, RetrievalCall};
pub use model::{Listing, ListingChild, ListingData, Post, PostData, epoch_seconds_to_utc};
