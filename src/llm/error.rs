use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding / chat service.
pub enum LlmError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("LLM request to '{url}' failed: {source}")]
    Request {
        /// Endpoint URL.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("LLM API returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode LLM response: {reason}")]
    Decode {
        /// Parser message.
        reason: String,
    },

    #[error("no embedding data in response")]
    EmptyEmbedding,

    #[error("no choices in response")]
    NoChoices,

    /// The conversation had no `user` message.
    #[error("no user messages found")]
    NoUserMessage,
}
