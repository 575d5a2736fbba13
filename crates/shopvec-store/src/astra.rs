//! Astra DB (DataStax) vector store client
//!
//! Uses the Data API JSON interface: the target collection is created on
//! first use with the configured vector options, then documents are
//! written with a single insertMany call.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shopvec_core::{AstraMetric, Document, Result, ShopvecError};
use shopvec_embed::EmbeddingClient;

const KEYSPACE: &str = "default_keyspace";

/// Astra DB vector store
pub struct AstraStore {
    client: Client,
    token: String,
    endpoint: String,
    collection: String,
    dimensions: Option<u32>,
    similarity_metric: Option<AstraMetric>,
}

#[derive(Debug, Deserialize)]
struct InsertManyResponse {
    status: Option<InsertManyStatus>,
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertManyStatus {
    inserted_ids: Vec<serde_json::Value>,
}

impl AstraStore {
    /// Create a new Astra store client
    pub fn new(
        token: impl Into<String>,
        endpoint: impl Into<String>,
        collection: impl Into<String>,
        dimensions: Option<u32>,
        similarity_metric: Option<AstraMetric>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            endpoint: endpoint.into(),
            collection: collection.into(),
            dimensions,
            similarity_metric,
        }
    }

    /// createCollection command body; dimension and metric are forwarded
    /// unchanged from the config when present
    fn create_collection_command(&self, fallback_dimension: usize) -> serde_json::Value {
        let mut vector = serde_json::Map::new();
        vector.insert(
            "dimension".to_string(),
            self.dimensions
                .map(|d| json!(d))
                .unwrap_or_else(|| json!(fallback_dimension)),
        );
        if let Some(metric) = self.similarity_metric {
            vector.insert("metric".to_string(), json!(metric.as_str()));
        }

        json!({
            "createCollection": {
                "name": self.collection,
                "options": { "vector": vector }
            }
        })
    }

    fn insert_many_command(documents: &[Document], embeddings: Vec<Vec<f32>>) -> serde_json::Value {
        let docs: Vec<serde_json::Value> = documents
            .iter()
            .zip(embeddings)
            .map(|(doc, vector)| {
                let mut body = serde_json::Map::new();
                body.insert("_id".to_string(), json!(doc.id));
                body.insert("content".to_string(), json!(doc.content));
                body.insert("$vector".to_string(), json!(vector));
                for (key, value) in &doc.metadata {
                    body.insert(key.clone(), value.clone());
                }
                serde_json::Value::Object(body)
            })
            .collect();

        json!({ "insertMany": { "documents": docs } })
    }

    async fn post_command(&self, path: &str, command: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(format!("{}/api/json/v1/{path}", self.endpoint))
            .header("Token", &self.token)
            .header("Content-Type", "application/json")
            .json(&command)
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Astra request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Store(format!("Astra error: {error_text}")));
        }

        response
            .json()
            .await
            .map_err(|e| ShopvecError::Store(format!("Failed to parse Astra response: {e}")))
    }
}

#[async_trait]
impl super::VectorStore for AstraStore {
    fn name(&self) -> &'static str {
        "Astra"
    }

    async fn load_documents(
        &self,
        embedder: &dyn EmbeddingClient,
        documents: &[Document],
    ) -> Result<u64> {
        if documents.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        // createCollection is idempotent for an existing collection with
        // matching options
        self.post_command(
            KEYSPACE,
            self.create_collection_command(embedder.dimension()),
        )
        .await?;

        tracing::debug!(
            collection = %self.collection,
            count = documents.len(),
            "inserting documents into Astra"
        );

        let body = self
            .post_command(
                &format!("{KEYSPACE}/{}", self.collection),
                Self::insert_many_command(documents, embeddings),
            )
            .await?;

        let result: InsertManyResponse = serde_json::from_value(body)
            .map_err(|e| ShopvecError::Store(format!("Failed to parse insertMany response: {e}")))?;

        if let Some(errors) = result.errors {
            if !errors.is_empty() {
                return Err(ShopvecError::Store(format!(
                    "Astra insertMany reported errors: {}",
                    serde_json::Value::Array(errors)
                )));
            }
        }

        Ok(result
            .status
            .map(|s| s.inserted_ids.len() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_collection_forwards_dimension_and_metric() {
        let store = AstraStore::new(
            "t1",
            "https://db.apps.astra.datastax.com",
            "products",
            Some(1536),
            Some(AstraMetric::Cosine),
        );

        let command = store.create_collection_command(768);
        let vector = &command["createCollection"]["options"]["vector"];
        assert_eq!(vector["dimension"], 1536);
        assert_eq!(vector["metric"], "cosine");
    }

    #[test]
    fn test_create_collection_falls_back_to_embedder_dimension() {
        let store = AstraStore::new(
            "t1",
            "https://db.apps.astra.datastax.com",
            "products",
            None,
            None,
        );

        let command = store.create_collection_command(768);
        let vector = &command["createCollection"]["options"]["vector"];
        assert_eq!(vector["dimension"], 768);
        assert!(vector.get("metric").is_none());
    }

    #[test]
    fn test_insert_many_attaches_vector_inline() {
        let docs = vec![Document::new("gid://shopify/Product/1", "Shirt")
            .with_metadata("title", "Shirt")];
        let command = AstraStore::insert_many_command(&docs, vec![vec![0.5, 0.5]]);

        let inserted = &command["insertMany"]["documents"][0];
        assert_eq!(inserted["_id"], "gid://shopify/Product/1");
        assert_eq!(inserted["$vector"], serde_json::json!([0.5, 0.5]));
        assert_eq!(inserted["title"], "Shirt");
    }
}
