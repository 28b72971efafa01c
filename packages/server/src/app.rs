//! Application setup and router configuration.

use std::sync::Arc;

use axum::{extract::Extension, http::Method, routing::get, Router};
use sponsorfacts::{FactAggregator, HttpFetcher};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::{facts_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FactAggregator>,
}

/// Build the Axum application router
pub fn build_app(config: &Config) -> Router {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .build()
        .expect("default reqwest client options are valid");
    let fetcher = Arc::new(
        HttpFetcher::new()
            .with_user_agent(config.user_agent.clone())
            .with_client(client),
    );

    let app_state = AppState {
        aggregator: Arc::new(FactAggregator::new(fetcher)),
    };

    // CORS: the endpoint is read-only and public
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/facts", get(facts_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
