//! Elasticsearch vector store client
//!
//! Ensures the target index carries a dense_vector mapping with the
//! configured KNN engine and similarity, then writes all documents with
//! one _bulk request.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shopvec_core::{Document, ElasticSimilarity, KnnEngine, Result, ShopvecError};
use shopvec_embed::EmbeddingClient;

/// Elasticsearch vector store
pub struct ElasticsearchStore {
    client: Client,
    url: String,
    index_name: String,
    api_key: String,
    engine: Option<KnnEngine>,
    similarity: Option<ElasticSimilarity>,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    errors: bool,
    items: Vec<serde_json::Value>,
}

impl ElasticsearchStore {
    /// Create a new Elasticsearch store client
    pub fn new(
        url: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
        engine: Option<KnnEngine>,
        similarity: Option<ElasticSimilarity>,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            engine,
            similarity,
        }
    }

    /// Index mapping with a dense_vector field; engine and similarity are
    /// forwarded unchanged from the config when present
    fn index_mapping(&self, dims: usize) -> serde_json::Value {
        let mut embedding = serde_json::Map::new();
        embedding.insert("type".to_string(), json!("dense_vector"));
        embedding.insert("dims".to_string(), json!(dims));
        embedding.insert("index".to_string(), json!(true));
        if let Some(similarity) = self.similarity {
            embedding.insert("similarity".to_string(), json!(similarity.as_str()));
        }
        if let Some(engine) = self.engine {
            embedding.insert("index_options".to_string(), json!({ "type": engine.as_str() }));
        }

        json!({
            "mappings": {
                "properties": {
                    "embedding": embedding,
                    "content": { "type": "text" },
                    "metadata": { "type": "object", "enabled": true }
                }
            }
        })
    }

    /// NDJSON body for the _bulk endpoint
    fn bulk_body(
        index_name: &str,
        documents: &[Document],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<String> {
        let mut body = String::new();
        for (doc, vector) in documents.iter().zip(embeddings) {
            let action = json!({ "index": { "_index": index_name, "_id": doc.id } });
            let source = json!({
                "content": doc.content,
                "embedding": vector,
                "metadata": doc.metadata,
            });
            body.push_str(&serde_json::to_string(&action).map_err(|e| {
                ShopvecError::Store(format!("Failed to encode bulk action: {e}"))
            })?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&source).map_err(|e| {
                ShopvecError::Store(format!("Failed to encode bulk document: {e}"))
            })?);
            body.push('\n');
        }
        Ok(body)
    }

    async fn ensure_index(&self, dims: usize) -> Result<()> {
        let head = self
            .client
            .head(format!("{}/{}", self.url, self.index_name))
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Elasticsearch request failed: {e}")))?;

        if head.status().is_success() {
            return Ok(());
        }

        let response = self
            .client
            .put(format!("{}/{}", self.url, self.index_name))
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.index_mapping(dims))
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Elasticsearch request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Store(format!(
                "Failed to create Elasticsearch index {}: {error_text}",
                self.index_name
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl super::VectorStore for ElasticsearchStore {
    fn name(&self) -> &'static str {
        "Elasticsearch"
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

        self.ensure_index(embedder.dimension()).await?;

        tracing::debug!(
            index = %self.index_name,
            count = documents.len(),
            "bulk-writing documents to Elasticsearch"
        );

        let body = Self::bulk_body(&self.index_name, documents, embeddings)?;

        let response = self
            .client
            .post(format!("{}/_bulk", self.url))
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| ShopvecError::Store(format!("Elasticsearch bulk request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Store(format!(
                "Elasticsearch bulk error: {error_text}"
            )));
        }

        let result: BulkResponse = response
            .json()
            .await
            .map_err(|e| ShopvecError::Store(format!("Failed to parse bulk response: {e}")))?;

        if result.errors {
            return Err(ShopvecError::Store(
                "Elasticsearch bulk write reported item errors".to_string(),
            ));
        }

        Ok(result.items.len() as u64)
    }
}
