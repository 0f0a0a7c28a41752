//! # Client Configuration Module
//!
//! This module provides the connection settings for the search client: where
//! the search form lives, how long to wait for it, and how to identify
//! ourselves. It uses a builder pattern for flexible configuration.

use std::time::Duration;

use url::Url;

use crate::error::Result;

/// Site the search form and detail pages are served from
pub const DEFAULT_BASE_URL: &str = "https://www.hochschulkompass.de";

/// Path of the extended study program search form
pub const DEFAULT_SEARCH_PATH: &str = "/studium/studiengangsuche/erweiterte-studiengangsuche.html";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Browser-like user agent; the site serves the same markup to it as to browsers
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0 Safari/537.36";

/// Configuration for the search client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the site; detail links are resolved against it
    pub base_url: String,

    /// Path of the search form relative to `base_url`
    pub search_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent to send
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the base URL of the site
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the search form path
    pub fn search_path(mut self, search_path: impl Into<String>) -> Self {
        self.config.search_path = search_path.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl ClientConfig {
    /// Create a new builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Get the timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Full URL of the search form
    pub fn search_url(&self) -> Result<Url> {
        Ok(self.base()?.join(&self.search_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "https://www.hochschulkompass.de/studium/studiengangsuche/erweiterte-studiengangsuche.html"
        );
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:8080")
            .search_path("/search.html")
            .timeout_secs(3)
            .user_agent("test-agent")
            .build();

        assert_eq!(config.search_url().unwrap().as_str(), "http://127.0.0.1:8080/search.html");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::builder().base_url("not a url").build();

        assert!(config.search_url().is_err());
    }
}
