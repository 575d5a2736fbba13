//! API route definitions

use crate::handlers::{config, ingest, products};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Wizard configuration endpoints
        .route("/config", get(config::get_config))
        .route("/config/vector-store", put(config::put_vector_store))
        .route("/config/embedding-model", put(config::put_embedding_model))
        // Product endpoints
        .route("/products/fetch", post(products::fetch_products))
        // Ingestion endpoint
        .route("/ingest", post(ingest::start_ingestion))
}
