//! Ingestion trigger handler
//!
//! One-shot: resolves the staged configs, fetches products when no
//! payload is supplied inline, and runs the orchestrator. The run is
//! awaited to completion and the report returned; once started it
//! cannot be cancelled.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use shopvec_ingest::{ingest_products, IngestionReport, ShopifyClient};
use std::sync::Arc;
use utoipa::ToSchema;

/// Ingestion request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IngestRequest {
    /// Raw products payload from a prior fetch; when absent the server
    /// fetches from Shopify itself
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub products: Option<serde_json::Value>,
}

/// Start a one-shot ingestion run
#[utoipa::path(
    post,
    path = "/api/v1/ingest",
    tag = "ingest",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Ingestion completed", body = IngestionReport),
        (status = 400, description = "Missing or unsupported configuration", body = crate::error::ApiError),
        (status = 409, description = "An ingestion run is already in progress", body = crate::error::ApiError),
        (status = 502, description = "Provider call failed", body = crate::error::ApiError)
    )
)]
pub async fn start_ingestion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let (store_config, embedding_config) = {
        let session = state.session.read().await;
        let store = session.vector_store.clone().ok_or_else(|| {
            AppError::BadRequest("Vector store is not configured".to_string())
        })?;
        let embedding = session.embedding_model.clone().ok_or_else(|| {
            AppError::BadRequest("Embedding model is not configured".to_string())
        })?;
        (store, embedding)
    };

    if !state.try_begin_ingestion() {
        return Err(AppError::Conflict(
            "An ingestion run is already in progress".to_string(),
        ));
    }

    let result = run_ingestion(&state, &embedding_config, &store_config, request.products).await;
    state.end_ingestion();

    let report = result?;
    state.session.write().await.last_report = Some(report.clone());

    Ok(Json(report))
}

async fn run_ingestion(
    state: &AppState,
    embedding_config: &shopvec_core::EmbeddingModelConfig,
    store_config: &shopvec_core::VectorStoreConfig,
    products: Option<serde_json::Value>,
) -> Result<IngestionReport, AppError> {
    let payload = match products {
        Some(payload) => payload,
        None => {
            let client = ShopifyClient::from_config(&state.config.shopify)?;
            client.fetch_products().await?
        }
    };

    let report = ingest_products(
        embedding_config,
        store_config,
        &payload,
        &state.config.ingest,
    )
    .await?;

    Ok(report)
}
