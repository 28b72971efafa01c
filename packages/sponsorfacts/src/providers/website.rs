//! Sponsor-website provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ProviderError, ProviderResult};
use crate::extract::extract_facts;
use crate::fetch::Fetcher;
use crate::providers::FactProvider;
use crate::types::{Contribution, SourceKind, SourceRecord, SponsorQuery};

/// Normalize a raw website hint to a bare `host[/path]` form.
///
/// The hint is parsed as a URL (with `https://` prefixed when it does
/// not already start with `http`); the result is the parsed hostname
/// plus the path, with the path omitted when it is just `/`. URL
/// parsing lowercases the host; path casing and any trailing slash are
/// preserved. When the hint does not parse, a leading `http(s)://` is
/// stripped from the raw string instead. Empty hint yields an empty
/// string.
pub fn normalize_site(site: &str) -> String {
    if site.is_empty() {
        return String::new();
    }

    let candidate = if site.starts_with("http") {
        site.to_string()
    } else {
        format!("https://{site}")
    };

    match url::Url::parse(&candidate) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => {
                let path = parsed.path();
                if path == "/" {
                    host.to_string()
                } else {
                    format!("{host}{path}")
                }
            }
            None => strip_scheme(site),
        },
        Err(_) => strip_scheme(site),
    }
}

fn strip_scheme(site: &str) -> String {
    site.strip_prefix("https://")
        .or_else(|| site.strip_prefix("http://"))
        .unwrap_or(site)
        .to_string()
}

/// Fetches the sponsor's own website (when a hint was given) and runs
/// the HTML fact extractor over it.
pub struct WebsiteProvider {
    fetcher: Arc<dyn Fetcher>,
}

impl WebsiteProvider {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl FactProvider for WebsiteProvider {
    fn name(&self) -> &'static str {
        "website"
    }

    async fn fetch_facts(&self, query: &SponsorQuery) -> ProviderResult<Contribution> {
        let hint = match query.website_hint.as_deref() {
            Some(hint) if !hint.is_empty() => hint,
            _ => return Ok(Contribution::empty()),
        };

        let normalized = normalize_site(hint);
        if normalized.is_empty() {
            // A bare scheme like "https://" normalizes to nothing.
            return Err(ProviderError::InvalidUrl {
                url: hint.to_string(),
            });
        }

        let url = format!("https://{normalized}");
        let html = self.fetcher.get_text(&url).await?;
        let facts = extract_facts(&html).into_iter().collect();

        Ok(Contribution::new(
            facts,
            SourceRecord::new(SourceKind::Website, url),
        ))
    }
}
