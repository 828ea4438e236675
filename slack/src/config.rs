use std::time::Duration;

use crate::error::{Result, SlackError};

const DEFAULT_BASE_URL: &str = "https://slack.com/api";
const DEFAULT_USER_AGENT: &str = concat!("slack-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`RestTransport`](crate::transport::RestTransport).
///
/// Only the token is required; everything else has workable defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the REST API, without a trailing slash
    pub base_url: String,

    /// Bearer token sent with every call as the `token` parameter
    pub token: String,

    /// Per-request timeout for the underlying HTTP client
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given API token with default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the API root, e.g. to point at a compatible self-hosted server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(SlackError::Config("API token must not be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SlackError::Config(format!(
                "Base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(SlackError::Config("Timeout must be greater than 0".to_string()));
        }
        if self.timeout.as_secs() > 300 {
            return Err(SlackError::Config("Timeout too long (max 5 minutes)".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("xoxb-token");

        assert_eq!(config.base_url, "https://slack.com/api");
        assert_eq!(config.token, "xoxb-token");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("xoxb-token")
            .with_base_url("https://example.test/api/")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("my-bot/1.0");

        // Trailing slash is stripped so URL joining stays predictable
        assert_eq!(config.base_url, "https://example.test/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "my-bot/1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        // Empty token
        let config = ClientConfig::new("   ");
        assert!(config.validate().is_err());

        // Base URL without a scheme
        let config = ClientConfig::new("xoxb-token").with_base_url("slack.com/api");
        assert!(config.validate().is_err());

        // Zero timeout
        let config = ClientConfig::new("xoxb-token").with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        // Timeout too long
        let config = ClientConfig::new("xoxb-token").with_timeout(Duration::from_secs(600));
        assert!(config.validate().is_err());
    }
}
