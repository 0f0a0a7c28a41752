//! Error types for the Hochschulkompass client

use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for search operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error (DNS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search endpoint answered with a non-success status
    #[error("Search request failed: {status_code} from {url}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// URL that was requested
        url: String,
    },

    /// Base URL or search path could not be parsed
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector could not be compiled
    #[error("Selector error: {0}")]
    Selector(String),
}

impl Error {
    /// Status code of a failed request, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status_code, .. } => Some(*status_code),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
