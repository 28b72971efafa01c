//! Sponsor Fact Aggregation Pipeline
//!
//! Produces a short list of neutral, de-duplicated factual statements
//! about a named organization by aggregating evidence from several
//! independent, unreliable online sources.
//!
//! # Design
//!
//! - Providers run in a fixed order (website, Wikipedia + Wikidata,
//!   search fallback) and are each an isolation boundary: a failing
//!   upstream withholds its contribution, nothing more.
//! - Extraction is heuristic regex matching over raw markup, by
//!   design; a degraded-but-present result beats a failed one.
//! - Every candidate passes through the neutrality cleaner; the output
//!   is deduplicated, insertion-ordered, and capped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sponsorfacts::{FactAggregator, HttpFetcher, SponsorQuery};
//!
//! let aggregator = FactAggregator::new(Arc::new(HttpFetcher::new()));
//! let query = SponsorQuery::new("Acme Co").with_website("acme.example");
//! let sheet = aggregator.aggregate(&query).await?;
//! ```
//!
//! # Modules
//!
//! - [`clean`] - Neutrality cleaning of candidate strings
//! - [`extract`] - Heuristic HTML fact extraction
//! - [`providers`] - The source provider chain
//! - [`aggregate`] - Orchestration, merging, and output policy
//! - [`testing`] - Mock implementations for tests

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod providers;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use aggregate::FactAggregator;
pub use clean::clean;
pub use error::{AggregateError, AggregateResult, ProviderError, ProviderResult};
pub use extract::extract_facts;
pub use fetch::{Fetcher, HttpFetcher};
pub use providers::{
    normalize_site, FactProvider, SearchFallbackProvider, WebsiteProvider, WikipediaProvider,
};
pub use types::{
    AggregatorConfig, Contribution, FactSheet, SourceKind, SourceRecord, SponsorQuery,
};
