//! # Study Program Search Module
//!
//! This module submits the Hochschulkompass extended search form and turns
//! the first results page into structured records.
//!
//! ## Key Components
//!
//! - `SearchFilters`: Optional criteria, unset means unconstrained
//! - `build_payload`: Maps filters onto the form's field names
//! - `submit_search`: One POST against the search endpoint
//! - `parse_results`: Extracts `StudyProgram` records from the results page
//! - `SearchClient` / `fetch_study_programs`: The whole pipeline in one call
//!
//! ## Search Process
//!
//! 1. Translate the filter set into a form payload
//! 2. Post the payload to the search form
//! 3. Fail on transport errors or non-success status
//! 4. Parse every result block of the returned page
//!
//! Each call is independent: no connection, cookie or result is kept between
//! calls, and only the first results page is fetched.

mod config;
mod extraction;
mod filters;
mod payload;
mod transport;

pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_SEARCH_PATH, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
pub use extraction::{
    INSTITUTION_LABEL, ResultSelectors, StudyProgram, parse_results, parse_results_with,
};
pub use filters::{SearchFilters, SearchFiltersBuilder, StudyType};
pub use payload::{FormPayload, FormValue, build_payload};
pub use transport::submit_search;

use tracing::{info, instrument};

use crate::error::Result;

/// Run one search with the given configuration
#[instrument(skip_all)]
pub async fn fetch_study_programs(
    filters: &SearchFilters,
    config: &ClientConfig,
) -> Result<Vec<StudyProgram>> {
    let base_url = config.base()?;
    let payload = build_payload(filters);
    let html = submit_search(config, &payload).await?;
    let programs = parse_results(&html, &base_url);
    info!("Found {} study programs", programs.len());
    Ok(programs)
}

/// Run one search against hochschulkompass.de with default settings
pub async fn fetch_study_programs_default(filters: &SearchFilters) -> Result<Vec<StudyProgram>> {
    fetch_study_programs(filters, &ClientConfig::default()).await
}

/// Search client bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct SearchClient {
    config: ClientConfig,
}

impl SearchClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Run one search
    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<StudyProgram>> {
        fetch_study_programs(filters, &self.config).await
    }

    /// Get the configuration reference
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
