//! Google Generative Language embedding client
//!
//! Uses the batchEmbedContents endpoint with a fixed RETRIEVAL_DOCUMENT
//! task-type hint; the hint is not user-configurable.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shopvec_core::{EmbeddingModelConfig, Result, ShopvecError};

const TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";

/// Google embedding API client
pub struct GoogleEmbedding {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    dimension: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: String,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

impl GoogleEmbedding {
    /// Create a new Google embedding client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        let dimension = match model.as_str() {
            "text-embedding-004" => 768,
            _ => 768,
        };

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model,
            dimension,
        }
    }

    /// Create from config
    pub fn from_config(config: &EmbeddingModelConfig) -> Self {
        Self::new(config.api_key.clone(), config.model_name.clone())
    }
}

#[async_trait]
impl super::EmbeddingClient for GoogleEmbedding {
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

        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: format!("models/{}", self.model),
                    content: Content {
                        parts: vec![Part { text: text.clone() }],
                    },
                    task_type: TASK_TYPE.to_string(),
                })
                .collect(),
        };

        let url = format!(
            "{}/models/{}:batchEmbedContents?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ShopvecError::Embedding(format!("Embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ShopvecError::Embedding(format!(
                "Google embedding error: {error_text}"
            )));
        }

        let result: BatchEmbedResponse = response.json().await.map_err(|e| {
            ShopvecError::Embedding(format!("Failed to parse embedding response: {e}"))
        })?;

        Ok(result.embeddings.into_iter().map(|e| e.values).collect())
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
    fn test_google_dimension() {
        let client = GoogleEmbedding::new("test-key", "text-embedding-004");
        assert_eq!(client.dimension(), 768);
        assert_eq!(client.model(), "text-embedding-004");
    }

    #[test]
    fn test_batch_request_uses_retrieval_document_hint() {
        let request = BatchEmbedRequest {
            requests: vec![EmbedContentRequest {
                model: "models/text-embedding-004".to_string(),
                content: Content {
                    parts: vec![Part {
                        text: "Shirt".to_string(),
                    }],
                },
                task_type: TASK_TYPE.to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requests"][0]["taskType"], "RETRIEVAL_DOCUMENT");
    }
}
