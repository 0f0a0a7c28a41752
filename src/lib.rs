//! # Hochschulkompass - Study Program Search Client for Rust
//!
//! This crate submits the extended study program search of
//! [hochschulkompass.de](https://www.hochschulkompass.de) and parses the
//! results page into structured records.
//!
//! ## Features
//!
//! - Typed filter set with a builder, unset fields leave a dimension unconstrained
//! - Form payload that matches the site's field names
//! - Single-request transport with a configurable timeout
//! - CSS-selector based extraction of title, facts and detail link
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use hochschulkompass::search::{ClientConfig, SearchClient, SearchFilters, StudyType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SearchClient::new(ClientConfig::default());
//!     let filters = SearchFilters::builder()
//!         .fach("Design")
//!         .study_type(StudyType::Both)
//!         .build();
//!
//!     for program in client.search(&filters).await? {
//!         println!("{} - {:?}", program.title, program.institution());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
pub mod search;

pub use error::Error;
pub use search::{
    SearchClient, SearchFilters, StudyProgram, fetch_study_programs, fetch_study_programs_default,
};

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::search::{ClientConfig, SearchClient, SearchFilters, StudyProgram, StudyType};
}
