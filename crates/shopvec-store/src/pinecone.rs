//! Pinecone vector store client
//!
//! Talks to the Pinecone REST API: the control plane resolves the index
//! host by name, then vectors are upserted against the data plane in a
//! single bulk call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shopvec_core::{Document, Result, ShopvecError};
use shopvec_embed::EmbeddingClient;

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// Pinecone vector store
pub struct PineconeStore {
    client: Client,
    api_key: String,
    index_name: String,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<PineconeVector>,
}

#[derive(Debug, Serialize)]
struct PineconeVector {
    id: String,
    values: Vec<f32>,
    metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: u64,
}

impl PineconeStore {
    /// Create a new Pinecone store client
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            index_name: index_name.into(),
        }
    }

    /// Resolve the data-plane host for the configured index
    async fn index_host(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{CONTROL_PLANE_URL}/indexes/{}", self.index_name))
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Pinecone request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Store(format!(
                "Failed to describe Pinecone index {}: {error_text}",
                self.index_name
            )));
        }

        let description: IndexDescription = response
            .json()
            .await
            .map_err(|e| ShopvecError::Store(format!("Failed to parse index description: {e}")))?;

        Ok(description.host)
    }

    fn build_vectors(documents: &[Document], embeddings: Vec<Vec<f32>>) -> Vec<PineconeVector> {
        documents
            .iter()
            .zip(embeddings)
            .map(|(doc, values)| {
                let mut metadata = serde_json::Map::new();
                metadata.insert("content".to_string(), doc.content.clone().into());
                for (key, value) in &doc.metadata {
                    metadata.insert(key.clone(), value.clone());
                }
                PineconeVector {
                    id: doc.id.clone(),
                    values,
                    metadata: serde_json::Value::Object(metadata),
                }
            })
            .collect()
    }
}

#[async_trait]
impl super::VectorStore for PineconeStore {
    fn name(&self) -> &'static str {
        "Pinecone"
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

        let host = self.index_host().await?;
        let request = UpsertRequest {
            vectors: Self::build_vectors(documents, embeddings),
        };

        tracing::debug!(
            index = %self.index_name,
            count = request.vectors.len(),
            "upserting vectors to Pinecone"
        );

        let response = self
            .client
            .post(format!("https://{host}/vectors/upsert"))
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Pinecone upsert failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Store(format!(
                "Pinecone upsert error: {error_text}"
            )));
        }

        let result: UpsertResponse = response
            .json()
            .await
            .map_err(|e| ShopvecError::Store(format!("Failed to parse upsert response: {e}")))?;

        Ok(result.upserted_count)
    }
}
