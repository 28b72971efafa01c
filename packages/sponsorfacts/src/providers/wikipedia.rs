//! Wikipedia provider with Wikidata enrichment.
//!
//! Two dependent MediaWiki calls (search, then intro extract), plus an
//! optional third call to Wikidata when the page exposes an entity id.
//! Wikidata facts fold into the Wikipedia provenance record; they do
//! not add a source entry of their own.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::clean::{clean, strip_asides};
use crate::error::ProviderResult;
use crate::fetch::Fetcher;
use crate::providers::FactProvider;
use crate::types::{Contribution, SourceKind, SourceRecord, SponsorQuery};

static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    pageid: u64,
}

/// Looks the sponsor up on Wikipedia and keeps the first few cleaned
/// sentences of the intro extract as candidates.
pub struct WikipediaProvider {
    fetcher: Arc<dyn Fetcher>,
    sentence_limit: usize,
}

impl WikipediaProvider {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            sentence_limit: 3,
        }
    }

    /// How many intro sentences to keep as candidates.
    pub fn with_sentence_limit(mut self, limit: usize) -> Self {
        self.sentence_limit = limit;
        self
    }

    /// Fetch structured claims for a Wikidata entity and map the known
    /// ones to facts. Claim-level absence or odd shapes are skipped;
    /// the whole call failing is absorbed by the caller.
    async fn enrich_from_wikidata(&self, qid: &str, facts: &mut Vec<String>) -> ProviderResult<()> {
        let url = format!("https://www.wikidata.org/wiki/Special:EntityData/{qid}.json");
        let data = self.fetcher.get_json(&url).await?;
        let Some(claims) = data["entities"][qid].get("claims") else {
            return Ok(());
        };

        if let Some(time) = claim_value(claims, "P571").and_then(|v| v["time"].as_str()) {
            if let Some(year) = RE_YEAR.find(time) {
                facts.push(format!("founded in {}", year.as_str()));
            }
        }
        // P159 and P452 only qualify when the claim carries a textual
        // label, not a bare entity identifier.
        if let Some(place) = claim_value(claims, "P159").and_then(|v| v["text"].as_str()) {
            facts.push(format!("headquartered in {place}"));
        }
        if let Some(industry) = claim_value(claims, "P452").and_then(|v| v["text"].as_str()) {
            facts.push(format!("{} sector", industry.to_lowercase()).trim().to_string());
        }

        Ok(())
    }
}

/// Main-snak value of the first statement for a property, if any.
fn claim_value<'a>(claims: &'a Value, property: &str) -> Option<&'a Value> {
    claims
        .get(property)?
        .get(0)?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")
}

#[async_trait]
impl FactProvider for WikipediaProvider {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn fetch_facts(&self, query: &SponsorQuery) -> ProviderResult<Contribution> {
        let search_url = format!(
            "https://en.wikipedia.org/w/api.php?action=query&list=search&srsearch={}&format=json",
            urlencoding::encode(&query.name)
        );
        let search: SearchResponse = serde_json::from_value(self.fetcher.get_json(&search_url).await?)?;

        let Some(hit) = search.query.and_then(|q| q.search.into_iter().next()) else {
            return Ok(Contribution::empty());
        };
        let pageid = hit.pageid;

        let page_url = format!(
            "https://en.wikipedia.org/w/api.php?action=query&prop=extracts|pageprops|info&exintro=1&explaintext=1&inprop=url&pageids={pageid}&format=json"
        );
        let page_data = self.fetcher.get_json(&page_url).await?;
        let page = &page_data["query"]["pages"][pageid.to_string()];
        if !page.is_object() {
            return Ok(Contribution::empty());
        }

        let extract = page["extract"].as_str().unwrap_or_default();
        let stripped = strip_asides(extract);
        let mut facts: Vec<String> = stripped
            .split(['.', '\n'])
            .map(clean)
            .filter(|s| !s.is_empty())
            .take(self.sentence_limit)
            .collect();

        if let Some(qid) = page["pageprops"]["wikibase_item"].as_str() {
            if let Err(error) = self.enrich_from_wikidata(qid, &mut facts).await {
                debug!(qid = %qid, error = %error, "Wikidata enrichment failed, keeping Wikipedia facts");
            }
        }

        let canonical_url = match page["fullurl"].as_str() {
            Some(url) => url.to_string(),
            None => format!("https://en.wikipedia.org/?curid={pageid}"),
        };

        Ok(Contribution::new(
            facts,
            SourceRecord::new(SourceKind::Wikipedia, canonical_url),
        ))
    }
}
