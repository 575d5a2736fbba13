//! Shopify Admin API client
//!
//! The product fetch collaborator: runs the fixed products query against
//! the Admin GraphQL API and returns the raw JSON payload. The ingestion
//! core treats that payload as opaque.

use reqwest::Client;
use serde_json::{json, Value};
use shopvec_core::{Result, ShopifyConfig, ShopvecError};

/// Fixed Admin API query; id, title, and handle for up to 10 products
pub const PRODUCTS_QUERY: &str = "query {
    products(first: 10) {
      edges {
        node {
          id
          title
          handle
        }
      }
    }
  }";

/// Shopify Admin GraphQL client
pub struct ShopifyClient {
    client: Client,
    shop_domain: String,
    access_token: String,
    api_version: String,
}

impl ShopifyClient {
    /// Create a new Shopify client
    pub fn new(
        shop_domain: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            shop_domain: shop_domain.into(),
            access_token: access_token.into(),
            api_version: api_version.into(),
        }
    }

    /// Create from config
    pub fn from_config(config: &ShopifyConfig) -> Result<Self> {
        if config.shop_domain.is_empty() {
            return Err(ShopvecError::Config(
                "Shopify shop domain required".to_string(),
            ));
        }
        let access_token = config
            .access_token
            .as_ref()
            .ok_or_else(|| ShopvecError::Config("Shopify access token required".to_string()))?;

        Ok(Self::new(
            config.shop_domain.clone(),
            access_token.clone(),
            config.api_version.clone(),
        ))
    }

    fn graphql_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }

    /// Fetch up to 10 products and return the raw products connection,
    /// shaped as `{ "products": { "edges": [...] } }`
    pub async fn fetch_products(&self) -> Result<Value> {
        let response = self
            .client
            .post(self.graphql_url())
            .header("X-Shopify-Access-Token", &self.access_token)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": PRODUCTS_QUERY }))
            .send()
            .await
            .map_err(|e| ShopvecError::Shopify(format!("Product fetch failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Shopify(format!(
                "Shopify Admin API error: {error_text}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ShopvecError::Shopify(format!("Failed to parse Shopify response: {e}")))?;

        if let Some(errors) = body.get("errors") {
            return Err(ShopvecError::Shopify(format!(
                "Shopify GraphQL errors: {errors}"
            )));
        }

        let products = body.pointer("/data/products").cloned().ok_or_else(|| {
            ShopvecError::Shopify("Shopify response missing products".to_string())
        })?;

        Ok(json!({ "products": products }))
    }
}
