//! Data types for the fact-aggregation pipeline.

use serde::{Deserialize, Serialize};

/// Immutable input to a single pipeline run.
#[derive(Debug, Clone)]
pub struct SponsorQuery {
    /// Organization name. Required; an empty name fails validation.
    pub name: String,

    /// Optional raw user-supplied URL or bare hostname for the
    /// sponsor's website.
    pub website_hint: Option<String>,
}

impl SponsorQuery {
    /// Build a query with no website hint.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website_hint: None,
        }
    }

    /// Attach a website hint.
    pub fn with_website(mut self, hint: impl Into<String>) -> Self {
        self.website_hint = Some(hint.into());
        self
    }
}

/// Which external source a provenance record points at.
///
/// Wikidata does not appear here: its facts fold into the Wikipedia
/// record's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Website,
    Wikipedia,
    Search,
}

/// One successfully-consulted provider: its kind and the absolute URL
/// that was consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub url: String,
}

impl SourceRecord {
    pub fn new(kind: SourceKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

/// What a single provider yields: zero or more candidate facts plus at
/// most one provenance record.
#[derive(Debug, Clone, Default)]
pub struct Contribution {
    pub facts: Vec<String>,
    pub source: Option<SourceRecord>,
}

impl Contribution {
    /// A contribution with nothing in it (provider consulted, nothing
    /// usable found).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(facts: Vec<String>, source: SourceRecord) -> Self {
        Self {
            facts,
            source: Some(source),
        }
    }
}

/// Terminal output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSheet {
    /// Cleaned, deduplicated facts in insertion order, at most
    /// [`AggregatorConfig::fact_cap`] of them.
    pub facts: Vec<String>,

    /// Provenance records in consultation order.
    pub sources: Vec<SourceRecord>,
}

/// Tunables for the aggregation pipeline.
///
/// The output cap lives here and nowhere else.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Maximum number of facts in the output.
    pub fact_cap: usize,

    /// The search fallback runs only while the accumulated fact count
    /// is below this threshold.
    pub fallback_threshold: usize,

    /// How many leading sentences of the Wikipedia intro extract to
    /// keep as candidates.
    pub wikipedia_sentence_limit: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            fact_cap: 5,
            fallback_threshold: 3,
            wikipedia_sentence_limit: 3,
        }
    }
}

impl AggregatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output cap.
    pub fn with_fact_cap(mut self, cap: usize) -> Self {
        self.fact_cap = cap;
        self
    }

    /// Set the search-fallback threshold.
    pub fn with_fallback_threshold(mut self, threshold: usize) -> Self {
        self.fallback_threshold = threshold;
        self
    }
}
