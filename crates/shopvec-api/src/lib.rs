//! shopvec API - REST server
//!
//! HTTP surface for the setup wizard: stage provider configs, preview
//! Shopify products, and trigger ingestion runs.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::config::put_vector_store,
        handlers::config::put_embedding_model,
        handlers::config::get_config,
        handlers::products::fetch_products,
        handlers::ingest::start_ingestion,
    ),
    components(schemas(
        error::ApiError,
        handlers::health::HealthResponse,
        handlers::health::ReadinessResponse,
        handlers::health::ReadinessChecks,
        handlers::config::ConfigAccepted,
        handlers::config::WizardStateResponse,
        handlers::config::EmbeddingSummary,
        handlers::ingest::IngestRequest,
        shopvec_core::FieldError,
        shopvec_core::EmbeddingProvider,
        shopvec_core::EmbeddingModelConfig,
        shopvec_core::VectorStoreConfig,
        shopvec_core::AstraMetric,
        shopvec_core::KnnEngine,
        shopvec_core::ElasticSimilarity,
        shopvec_ingest::IngestionReport,
    )),
    tags(
        (name = "health", description = "Health and readiness probes"),
        (name = "config", description = "Setup wizard configuration"),
        (name = "products", description = "Shopify product preview"),
        (name = "ingest", description = "Ingestion runs")
    ),
    info(
        title = "shopvec API",
        description = "Shopify product ingestion into vector stores"
    )
)]
pub struct ApiDoc;

/// Create the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics))
        .nest("/api/v1", routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Router over default state, used by integration tests
pub fn create_router_for_testing() -> Router {
    create_router(Arc::new(AppState::default()))
}
