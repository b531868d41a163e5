use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by content-source operations.
pub enum RedditError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("reddit request to '{url}' failed: {source}")]
    Request {
        /// Requested URL (without query string).
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reddit answered with a non-success status.
    #[error("reddit API returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not a listing.
    #[error("failed to decode reddit response: {reason}")]
    Decode {
        /// Parser message.
        reason: String,
    },
}
