//! OpenAI embedding API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shopvec_core::{EmbeddingModelConfig, Result, ShopvecError};

/// OpenAI embedding API client
pub struct OpenAiEmbedding {
    client: Client,
    api_key: String,
    model: String,
    dimensions: Option<u32>,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct OpenAiEmbeddingRequest {
    input: Vec<String>,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

impl OpenAiEmbedding {
    /// Create a new OpenAI embedding client
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: Option<u32>,
    ) -> Self {
        let model = model.into();
        // Default output dimension per model, unless overridden
        let dimension = dimensions.map(|d| d as usize).unwrap_or(match model.as_str() {
            "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            "text-embedding-ada-002" => 1536,
            _ => 1536,
        });

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model,
            dimensions,
            dimension,
        }
    }

    /// Create from config
    pub fn from_config(config: &EmbeddingModelConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model_name.clone(),
            config.dimensions,
        )
    }
}

#[async_trait]
impl super::EmbeddingClient for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| ShopvecError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = OpenAiEmbeddingRequest {
            input: texts.to_vec(),
            model: self.model.clone(),
            dimensions: self.dimensions,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/embeddings")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ShopvecError::Embedding(format!("Embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Embedding(format!(
                "OpenAI embedding error: {error_text}"
            )));
        }

        let result: OpenAiEmbeddingResponse = response.json().await.map_err(|e| {
            ShopvecError::Embedding(format!("Failed to parse embedding response: {e}"))
        })?;

        // Sort by index and extract embeddings
        let mut embeddings: Vec<_> = result.data.into_iter().collect();
        embeddings.sort_by_key(|e| e.index);

        Ok(embeddings.into_iter().map(|e| e.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmbeddingClient;

    #[test]
    fn test_default_dimensions() {
        let client = OpenAiEmbedding::new("test-key", "text-embedding-3-small", None);
        assert_eq!(client.dimension(), 1536);

        let client = OpenAiEmbedding::new("test-key", "text-embedding-3-large", None);
        assert_eq!(client.dimension(), 3072);
    }

    #[test]
    fn test_dimensions_override() {
        let client = OpenAiEmbedding::new("test-key", "text-embedding-3-large", Some(256));
        assert_eq!(client.dimension(), 256);
    }
}
