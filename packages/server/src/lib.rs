// Sponsor Facts API
//
// Thin HTTP shell over the sponsorfacts aggregation pipeline: parses
// the inbound query, runs the aggregator, serializes the envelope.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
