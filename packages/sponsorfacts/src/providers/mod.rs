//! Source providers: independent, best-effort units of external
//! evidence gathering.
//!
//! Each provider fetches data about the sponsor from one upstream and
//! yields candidate facts plus at most one provenance record. Failures
//! are values; the aggregator absorbs them so one broken upstream never
//! costs more than its own contribution.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{Contribution, SponsorQuery};

mod search;
mod website;
mod wikipedia;

pub use search::SearchFallbackProvider;
pub use website::{normalize_site, WebsiteProvider};
pub use wikipedia::WikipediaProvider;

/// The provider capability.
///
/// `Ok(Contribution::empty())` means the upstream was consulted but
/// nothing usable was found; `Err` means the consultation itself broke
/// (transport, status, shape). The aggregator treats both as "nothing
/// from this provider" but logs only the latter.
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fetch candidate facts for the sponsor.
    async fn fetch_facts(&self, query: &SponsorQuery) -> ProviderResult<Contribution>;
}
