//! Product fetch proxy
//!
//! Runs the fixed Shopify Admin GraphQL products query and returns the
//! raw payload, exactly as the wizard expects to hand it on to the
//! ingestion endpoint.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use shopvec_ingest::ShopifyClient;
use std::sync::Arc;

/// Fetch up to 10 products from the Shopify Admin API
#[utoipa::path(
    post,
    path = "/api/v1/products/fetch",
    tag = "products",
    responses(
        (status = 200, description = "Raw products payload"),
        (status = 500, description = "Shopify credentials missing", body = crate::error::ApiError),
        (status = 502, description = "Shopify call failed", body = crate::error::ApiError)
    )
)]
pub async fn fetch_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let client = ShopifyClient::from_config(&state.config.shopify)?;
    let payload = client.fetch_products().await?;

    Ok(Json(payload))
}
