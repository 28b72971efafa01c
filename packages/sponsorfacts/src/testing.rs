//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real network calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ProviderError, ProviderResult};
use crate::fetch::Fetcher;
use crate::providers::FactProvider;
use crate::types::{Contribution, SourceRecord, SponsorQuery};

/// A mock fetcher returning canned bodies keyed by exact URL.
///
/// URLs without a canned body fail with an HTTP 404 provider error,
/// which is how tests simulate a dead upstream.
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned text body for a URL.
    pub fn with_text(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get_text(&self, url: &str) -> ProviderResult<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// A mock provider with a fixed contribution or a fixed failure, plus
/// call tracking for gating assertions.
pub struct MockProvider {
    name: &'static str,
    contribution: Contribution,
    fail: bool,
    calls: AtomicUsize,
}

impl MockProvider {
    /// A provider that successfully contributes nothing.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            contribution: Contribution::empty(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Set the facts this provider yields.
    pub fn with_facts(mut self, facts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.contribution.facts = facts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the provenance record this provider yields.
    pub fn with_source(mut self, source: SourceRecord) -> Self {
        self.contribution.source = Some(source);
        self
    }

    /// Make every fetch fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// How many times the provider was consulted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FactProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_facts(&self, _query: &SponsorQuery) -> ProviderResult<Contribution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Status {
                status: 500,
                url: format!("mock://{}", self.name),
            });
        }
        Ok(self.contribution.clone())
    }
}
