//! The sponsor-facts query endpoint.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;
use sponsorfacts::{FactSheet, SponsorQuery};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct FactsParams {
    #[serde(default)]
    sponsor: String,
    website: Option<String>,
}

/// `GET /facts?sponsor=<name>&website=<hint>`
///
/// Missing or empty `sponsor` is a 400; a valid sponsor always yields
/// a 200 with at least one fact, however degraded the upstreams were.
pub async fn facts_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<FactsParams>,
) -> Result<Json<FactSheet>, ApiError> {
    let mut query = SponsorQuery::new(params.sponsor);
    if let Some(website) = params.website {
        query = query.with_website(website);
    }

    let sheet = state.aggregator.aggregate(&query).await?;
    info!(
        sponsor = %query.name,
        facts = sheet.facts.len(),
        sources = sheet.sources.len(),
        "sponsor facts assembled"
    );

    Ok(Json(sheet))
}
