//! The fact aggregator: provider orchestration, merging, and the
//! output policy.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::debug;

use crate::clean::clean;
use crate::error::{AggregateError, AggregateResult};
use crate::fetch::Fetcher;
use crate::providers::{
    normalize_site, FactProvider, SearchFallbackProvider, WebsiteProvider, WikipediaProvider,
};
use crate::types::{AggregatorConfig, FactSheet, SourceRecord, SponsorQuery};

/// Orchestrates the provider chain for one sponsor query.
///
/// Providers run strictly sequentially: the fallback's threshold check
/// needs the accumulated fact count from the earlier providers. A
/// provider failing costs only its own contribution; the run itself
/// fails only on an invalid query.
pub struct FactAggregator {
    website: Arc<dyn FactProvider>,
    wikipedia: Arc<dyn FactProvider>,
    fallback: Arc<dyn FactProvider>,
    config: AggregatorConfig,
}

impl FactAggregator {
    /// Build the standard provider chain over one shared fetcher.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_config(fetcher, AggregatorConfig::default())
    }

    /// Build the standard provider chain with explicit tunables.
    pub fn with_config(fetcher: Arc<dyn Fetcher>, config: AggregatorConfig) -> Self {
        Self {
            website: Arc::new(WebsiteProvider::new(fetcher.clone())),
            wikipedia: Arc::new(
                WikipediaProvider::new(fetcher.clone())
                    .with_sentence_limit(config.wikipedia_sentence_limit),
            ),
            fallback: Arc::new(SearchFallbackProvider::new(fetcher)),
            config,
        }
    }

    /// Assemble an aggregator from explicit providers. Intended for
    /// tests and callers that substitute their own sources.
    pub fn from_providers(
        website: Arc<dyn FactProvider>,
        wikipedia: Arc<dyn FactProvider>,
        fallback: Arc<dyn FactProvider>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            website,
            wikipedia,
            fallback,
            config,
        }
    }

    /// Run the pipeline for one query.
    pub async fn aggregate(&self, query: &SponsorQuery) -> AggregateResult<FactSheet> {
        if query.name.trim().is_empty() {
            return Err(AggregateError::MissingSponsor);
        }

        let mut facts: IndexSet<String> = IndexSet::new();
        let mut sources: Vec<SourceRecord> = Vec::new();

        let hint = query
            .website_hint
            .as_deref()
            .filter(|hint| !hint.is_empty());

        if hint.is_some() {
            self.consult(self.website.as_ref(), query, &mut facts, &mut sources)
                .await;
        }
        self.consult(self.wikipedia.as_ref(), query, &mut facts, &mut sources)
            .await;
        if facts.len() < self.config.fallback_threshold {
            self.consult(self.fallback.as_ref(), query, &mut facts, &mut sources)
                .await;
        }

        // Synthesis floor: a valid sponsor never yields zero facts.
        if facts.is_empty() {
            facts.insert(format!(
                "{} is referenced on public web sources",
                query.name
            ));
        }

        // The website pointer is unconditional, not threshold-gated.
        let site_fact = hint.map(normalize_site).filter(|n| !n.is_empty()).map(
            |normalized| format!("information available at {normalized}"),
        );
        if let Some(fact) = &site_fact {
            facts.insert(fact.clone());
        }

        Ok(FactSheet {
            facts: finalize(facts, site_fact.as_deref(), self.config.fact_cap),
            sources,
        })
    }

    async fn consult(
        &self,
        provider: &dyn FactProvider,
        query: &SponsorQuery,
        facts: &mut IndexSet<String>,
        sources: &mut Vec<SourceRecord>,
    ) {
        match provider.fetch_facts(query).await {
            Ok(contribution) => {
                for fact in contribution.facts {
                    facts.insert(fact);
                }
                if let Some(source) = contribution.source {
                    sources.push(source);
                }
            }
            Err(error) => {
                // Absorbed: the reason stays observable here, the
                // result carries no trace of it.
                debug!(
                    provider = provider.name(),
                    error = %error,
                    "provider failed, continuing without its contribution"
                );
            }
        }
    }
}

/// Final cleaning pass, re-deduplication, and truncation to the cap.
///
/// The website pointer fact survives truncation even when earlier
/// providers filled the cap: it displaces the last slot rather than
/// being cut.
fn finalize(facts: IndexSet<String>, site_fact: Option<&str>, cap: usize) -> Vec<String> {
    let cleaned: IndexSet<String> = facts
        .iter()
        .map(|fact| clean(fact))
        .filter(|fact| !fact.is_empty())
        .collect();

    let mut out: Vec<String> = cleaned.iter().take(cap).cloned().collect();

    if let Some(site_fact) = site_fact {
        let site_fact = clean(site_fact);
        if cleaned.contains(&site_fact) && !out.contains(&site_fact) {
            out.pop();
            out.push(site_fact);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use crate::types::{SourceKind, SourceRecord};

    fn aggregator_from(
        website: Arc<MockProvider>,
        wikipedia: Arc<MockProvider>,
        fallback: Arc<MockProvider>,
    ) -> FactAggregator {
        FactAggregator::from_providers(website, wikipedia, fallback, AggregatorConfig::default())
    }

    fn wiki_source() -> SourceRecord {
        SourceRecord::new(SourceKind::Wikipedia, "https://en.wikipedia.org/wiki/Acme")
    }

    #[tokio::test]
    async fn test_missing_sponsor_fails_before_any_fetch() {
        let website = Arc::new(MockProvider::new("website"));
        let wikipedia = Arc::new(MockProvider::new("wikipedia"));
        let fallback = Arc::new(MockProvider::new("search"));
        let aggregator =
            aggregator_from(website.clone(), wikipedia.clone(), fallback.clone());

        let result = aggregator.aggregate(&SponsorQuery::new("  ")).await;
        assert!(matches!(result, Err(AggregateError::MissingSponsor)));
        assert_eq!(website.calls(), 0);
        assert_eq!(wikipedia.calls(), 0);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_synthesis_floor_when_everything_fails() {
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website").failing()),
            Arc::new(MockProvider::new("wikipedia").failing()),
            Arc::new(MockProvider::new("search").failing()),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert_eq!(sheet.facts, vec!["Acme is referenced on public web sources"]);
        assert!(sheet.sources.is_empty());
    }

    #[tokio::test]
    async fn test_website_provider_skipped_without_hint() {
        let website = Arc::new(MockProvider::new("website"));
        let wikipedia = Arc::new(
            MockProvider::new("wikipedia")
                .with_facts(["one fact", "two fact", "three fact"])
                .with_source(wiki_source()),
        );
        let fallback = Arc::new(MockProvider::new("search"));
        let aggregator =
            aggregator_from(website.clone(), wikipedia.clone(), fallback.clone());

        aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert_eq!(website.calls(), 0);
        assert_eq!(wikipedia.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_gated_by_threshold() {
        let wikipedia = MockProvider::new("wikipedia")
            .with_facts(["one fact", "two fact", "three fact"])
            .with_source(wiki_source());
        let fallback = Arc::new(MockProvider::new("search"));
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website")),
            Arc::new(wikipedia),
            fallback.clone(),
        );

        aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        // Threshold already met: the fallback never runs.
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_runs_when_below_threshold() {
        let fallback = Arc::new(
            MockProvider::new("search")
                .with_facts(["a fallback fact"])
                .with_source(SourceRecord::new(SourceKind::Search, "https://found.test")),
        );
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website")),
            Arc::new(MockProvider::new("wikipedia").with_facts(["only fact"])),
            fallback.clone(),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert_eq!(fallback.calls(), 1);
        assert!(sheet.facts.contains(&"a fallback fact".to_string()));
    }

    #[tokio::test]
    async fn test_failed_wikipedia_with_search_success_yields_one_search_source() {
        let fallback = Arc::new(
            MockProvider::new("search")
                .with_facts(["a fallback fact"])
                .with_source(SourceRecord::new(SourceKind::Search, "https://found.test")),
        );
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website")),
            Arc::new(MockProvider::new("wikipedia")),
            fallback,
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert_eq!(sheet.sources.len(), 1);
        assert_eq!(sheet.sources[0].kind, SourceKind::Search);
    }

    #[tokio::test]
    async fn test_duplicates_merged_across_providers() {
        let aggregator = aggregator_from(
            Arc::new(
                MockProvider::new("website")
                    .with_facts(["founded in 1998", "shared fact"])
                    .with_source(SourceRecord::new(SourceKind::Website, "https://acme.test")),
            ),
            Arc::new(
                MockProvider::new("wikipedia")
                    .with_facts(["shared fact", "another fact"])
                    .with_source(wiki_source()),
            ),
            Arc::new(MockProvider::new("search")),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme").with_website("acme.test"))
            .await
            .unwrap();
        let shared = sheet.facts.iter().filter(|f| *f == "shared fact").count();
        assert_eq!(shared, 1);
        // Consultation order is preserved in sources.
        assert_eq!(sheet.sources[0].kind, SourceKind::Website);
        assert_eq!(sheet.sources[1].kind, SourceKind::Wikipedia);
    }

    #[tokio::test]
    async fn test_output_capped_with_website_fact_retained() {
        let many: Vec<String> = (1..=8).map(|i| format!("distinct fact number {i}")).collect();
        let aggregator = aggregator_from(
            Arc::new(
                MockProvider::new("website")
                    .with_facts(many)
                    .with_source(SourceRecord::new(SourceKind::Website, "https://acme.test")),
            ),
            Arc::new(MockProvider::new("wikipedia")),
            Arc::new(MockProvider::new("search")),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme").with_website("acme.test"))
            .await
            .unwrap();
        assert_eq!(sheet.facts.len(), AggregatorConfig::default().fact_cap);
        assert_eq!(
            sheet.facts.last().unwrap(),
            "information available at acme.test"
        );
    }

    #[tokio::test]
    async fn test_website_fact_present_even_with_no_other_facts() {
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website").failing()),
            Arc::new(MockProvider::new("wikipedia").failing()),
            Arc::new(MockProvider::new("search").failing()),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme").with_website("https://Example.com/About/"))
            .await
            .unwrap();
        let pointers: Vec<_> = sheet
            .facts
            .iter()
            .filter(|f| f.starts_with("information available at"))
            .collect();
        assert_eq!(pointers.len(), 1);
        assert_eq!(
            pointers[0].as_str(),
            "information available at example.com/About/"
        );
    }

    #[tokio::test]
    async fn test_facts_recleaned_in_final_pass() {
        let aggregator = aggregator_from(
            Arc::new(MockProvider::new("website")),
            Arc::new(
                MockProvider::new("wikipedia")
                    .with_facts(["a leading   maker of widgets"])
                    .with_source(wiki_source()),
            ),
            Arc::new(MockProvider::new("search")),
        );

        let sheet = aggregator
            .aggregate(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert!(sheet.facts.contains(&"a maker of widgets".to_string()));
    }
}
