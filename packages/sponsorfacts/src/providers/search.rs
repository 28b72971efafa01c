//! Search-engine fallback provider.
//!
//! Scrapes the first organic result off a keyless lite HTML results
//! page, follows it, and runs the fact extractor on the target. Pattern
//! matching against a third-party results page is brittle by nature;
//! this provider is strictly best-effort.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use crate::error::{ProviderError, ProviderResult};
use crate::extract::extract_facts;
use crate::fetch::Fetcher;
use crate::providers::FactProvider;
use crate::types::{Contribution, SourceKind, SourceRecord, SponsorQuery};

const SEARCH_BASE: &str = "https://duckduckgo.com";

/// Tracking-redirect prefix on organic result links.
const REDIRECT_PREFIX: &str = "/l/?uddg=";

static RE_RESULT_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a[^>]+class="result__a"[^>]*href="(.*?)""#).unwrap());

pub struct SearchFallbackProvider {
    fetcher: Arc<dyn Fetcher>,
}

impl SearchFallbackProvider {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Percent-decode a result href, strip the tracking-redirect
    /// prefix, and absolutize scheme-less links against the search
    /// host so provenance URLs are always scheme-qualified.
    fn resolve_result_link(href: &str) -> ProviderResult<String> {
        let decoded = urlencoding::decode(href).map_err(|_| ProviderError::MalformedResponse {
            url: SEARCH_BASE.to_string(),
            reason: "result link is not valid percent-encoding".to_string(),
        })?;
        let link = decoded
            .strip_prefix(REDIRECT_PREFIX)
            .unwrap_or_else(|| decoded.as_ref());

        if link.starts_with("http") {
            return Ok(link.to_string());
        }
        let base = url::Url::parse(SEARCH_BASE)?;
        Ok(base.join(link)?.to_string())
    }
}

#[async_trait]
impl FactProvider for SearchFallbackProvider {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn fetch_facts(&self, query: &SponsorQuery) -> ProviderResult<Contribution> {
        let results_url = format!(
            "{SEARCH_BASE}/html/?q={}",
            urlencoding::encode(&query.name)
        );
        let results_html = self.fetcher.get_text(&results_url).await?;

        let Some(href) = RE_RESULT_ANCHOR
            .captures(&results_html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
        else {
            return Ok(Contribution::empty());
        };

        let link = Self::resolve_result_link(href)?;
        let html = self.fetcher.get_text(&link).await?;
        let facts = extract_facts(&html).into_iter().collect();

        Ok(Contribution::new(
            facts,
            SourceRecord::new(SourceKind::Search, link),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    const RESULTS_URL: &str = "https://duckduckgo.com/html/?q=Acme";

    #[tokio::test]
    async fn test_first_result_followed_and_extracted() {
        let results = r#"<a rel="nofollow" class="result__a" href="/l/?uddg=https%3A%2F%2Facme.test%2F">Acme</a>"#;
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_text(RESULTS_URL, results)
                .with_text("https://acme.test/", "<title>Acme Co</title>"),
        );
        let provider = SearchFallbackProvider::new(fetcher);

        let contribution = provider
            .fetch_facts(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert!(contribution.facts.contains(&"Acme Co".to_string()));
        let source = contribution.source.unwrap();
        assert_eq!(source.kind, SourceKind::Search);
        assert_eq!(source.url, "https://acme.test/");
    }

    #[tokio::test]
    async fn test_no_matching_anchor_contributes_nothing() {
        let fetcher =
            Arc::new(MockFetcher::new().with_text(RESULTS_URL, "<div>no results</div>"));
        let provider = SearchFallbackProvider::new(fetcher);

        let contribution = provider
            .fetch_facts(&SponsorQuery::new("Acme"))
            .await
            .unwrap();
        assert!(contribution.facts.is_empty());
        assert!(contribution.source.is_none());
    }

    #[test]
    fn test_resolve_direct_link() {
        assert_eq!(
            SearchFallbackProvider::resolve_result_link("https://acme.test/about").unwrap(),
            "https://acme.test/about"
        );
    }

    #[test]
    fn test_resolve_strips_redirect_prefix() {
        assert_eq!(
            SearchFallbackProvider::resolve_result_link("/l/?uddg=https%3A%2F%2Facme.test%2F")
                .unwrap(),
            "https://acme.test/"
        );
    }

    #[test]
    fn test_resolve_absolutizes_scheme_relative_link() {
        assert_eq!(
            SearchFallbackProvider::resolve_result_link("//acme.test/about").unwrap(),
            "https://acme.test/about"
        );
    }
}
