//! Client configuration and builder.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use chatstream::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:8080")
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! ```

use std::time::Duration;

use crate::{Error, Result};

/// Default backend address, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Path of the chat endpoint, relative to the base URL.
const CHAT_PATH: &str = "/chat";

/// Configuration for a [`ChatClient`](crate::ChatClient).
///
/// Use [`ClientConfig::builder()`] to create a new configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the timeout if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_PATH)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Builder for [`ClientConfig`].
///
/// Validates the configuration when [`build()`](ClientConfigBuilder::build)
/// is called.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the backend base URL (default: `http://localhost:8080`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for collecting a full response.
    ///
    /// Applies to the convenience methods that wait for the stream to
    /// complete; consumers driving the event stream themselves manage
    /// their own deadlines.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration and build it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the base URL is empty or not
    /// an http(s) URL.
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("base URL must not be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "base URL must start with http:// or https://: {base_url}"
            )));
        }

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
        assert_eq!(config.chat_url(), "http://localhost:8080/chat");
    }

    #[test]
    fn chat_url_strips_trailing_slash() {
        let config = ClientConfig::builder()
            .base_url("https://example.com/")
            .build()
            .unwrap();
        assert_eq!(config.chat_url(), "https://example.com/chat");
    }

    #[test]
    fn timeout_is_recorded() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = ClientConfig::builder().base_url("  ").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let result = ClientConfig::builder().base_url("ftp://example.com").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
