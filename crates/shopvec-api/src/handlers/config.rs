//! Wizard configuration handlers
//!
//! The setup forms submit their provider configs here. Invalid input is
//! rejected with per-field errors and leaves the staged session
//! untouched, mirroring a form whose Save stays disabled.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use shopvec_core::{EmbeddingModelConfig, VectorStoreConfig};
use std::sync::Arc;
use utoipa::ToSchema;

/// Acknowledgement returned after staging a config
#[derive(Serialize, ToSchema)]
pub struct ConfigAccepted {
    pub provider: String,
}

/// Redacted view of the staged wizard state
#[derive(Serialize, ToSchema)]
pub struct WizardStateResponse {
    pub vector_store: Option<String>,
    pub embedding_model: Option<EmbeddingSummary>,
    pub ready_to_ingest: bool,
}

#[derive(Serialize, ToSchema)]
pub struct EmbeddingSummary {
    pub provider: String,
    pub model_name: String,
    pub dimensions: Option<u32>,
}

/// Stage the vector store configuration
#[utoipa::path(
    put,
    path = "/api/v1/config/vector-store",
    tag = "config",
    request_body = VectorStoreConfig,
    responses(
        (status = 200, description = "Configuration staged", body = ConfigAccepted),
        (status = 400, description = "Validation failed", body = crate::error::ApiError)
    )
)]
pub async fn put_vector_store(
    State(state): State<Arc<AppState>>,
    Json(config): Json<VectorStoreConfig>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let provider = config.provider_name().to_string();
    state.session.write().await.vector_store = Some(config);

    tracing::info!(provider = %provider, "vector store configuration staged");

    Ok((StatusCode::OK, Json(ConfigAccepted { provider })))
}

/// Stage the embedding model configuration
#[utoipa::path(
    put,
    path = "/api/v1/config/embedding-model",
    tag = "config",
    request_body = EmbeddingModelConfig,
    responses(
        (status = 200, description = "Configuration staged", body = ConfigAccepted),
        (status = 400, description = "Validation failed", body = crate::error::ApiError)
    )
)]
pub async fn put_embedding_model(
    State(state): State<Arc<AppState>>,
    Json(config): Json<EmbeddingModelConfig>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let provider = config.provider.to_string();
    state.session.write().await.embedding_model = Some(config);

    tracing::info!(provider = %provider, "embedding model configuration staged");

    Ok((StatusCode::OK, Json(ConfigAccepted { provider })))
}

/// Current wizard state, credentials redacted
#[utoipa::path(
    get,
    path = "/api/v1/config",
    tag = "config",
    responses(
        (status = 200, description = "Current wizard state", body = WizardStateResponse)
    )
)]
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    let session = state.session.read().await;

    let embedding_model = session.embedding_model.as_ref().map(|c| EmbeddingSummary {
        provider: c.provider.to_string(),
        model_name: c.model_name.clone(),
        dimensions: c.dimensions,
    });

    Json(WizardStateResponse {
        vector_store: session
            .vector_store
            .as_ref()
            .map(|c| c.provider_name().to_string()),
        embedding_model,
        ready_to_ingest: session.vector_store.is_some() && session.embedding_model.is_some(),
    })
}
