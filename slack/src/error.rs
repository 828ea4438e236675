/// Result type for transport-level operations
pub type Result<T> = std::result::Result<T, SlackError>;

/// Error type for the client's own lifecycle and the blocking request path.
///
/// Resource proxies never return this: their actions are fire-and-forget and
/// error-transparent, so remote failures travel to the completion handler as
/// ordinary payloads.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SlackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}. Check your network connection and token.")]
    Http(String),

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}
