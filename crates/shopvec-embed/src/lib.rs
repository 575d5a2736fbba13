//! shopvec Embed - Embedding model resolver
//!
//! Maps an `EmbeddingModelConfig` to a ready-to-use embedding client.
//! OpenAI and Google are implemented; HuggingFace is advertised in the
//! configuration model but resolution fails with `UnsupportedProvider`.
//!
//! No retry, timeout tuning, or credential validation happens here:
//! provider failures propagate to the caller unchanged.

use async_trait::async_trait;
use shopvec_core::{EmbeddingModelConfig, EmbeddingProvider, Result, ShopvecError};

pub mod google;
pub mod openai;

pub use google::GoogleEmbedding;
pub use openai::OpenAiEmbedding;

// ============================================================================
// Embedding Trait
// ============================================================================

/// Trait for embedding generation
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimension produced by this client
    fn dimension(&self) -> usize;

    /// Model name, for logs and reports
    fn model(&self) -> &str;
}

// ============================================================================
// Factory function
// ============================================================================

/// Resolve an embedding client from config.
///
/// The config is trusted at this point; the model-belongs-to-provider
/// invariant is enforced by `EmbeddingModelConfig::validate` at the
/// boundary.
pub fn create_embedding_client(
    config: &EmbeddingModelConfig,
) -> Result<Box<dyn EmbeddingClient>> {
    match config.provider {
        EmbeddingProvider::OpenAi => Ok(Box::new(OpenAiEmbedding::from_config(config))),
        EmbeddingProvider::Google => Ok(Box::new(GoogleEmbedding::from_config(config))),
        EmbeddingProvider::HuggingFace => Err(ShopvecError::UnsupportedProvider(
            "HuggingFace embedding models are not supported yet".to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: EmbeddingProvider, model: &str) -> EmbeddingModelConfig {
        EmbeddingModelConfig {
            provider,
            model_name: model.to_string(),
            api_key: "k1".to_string(),
            dimensions: None,
        }
    }

    #[test]
    fn test_resolve_openai() {
        let client = create_embedding_client(&config(
            EmbeddingProvider::OpenAi,
            "text-embedding-3-small",
        ))
        .unwrap();
        assert_eq!(client.model(), "text-embedding-3-small");
        assert_eq!(client.dimension(), 1536);
    }

    #[test]
    fn test_resolve_google() {
        let client =
            create_embedding_client(&config(EmbeddingProvider::Google, "text-embedding-004"))
                .unwrap();
        assert_eq!(client.model(), "text-embedding-004");
        assert_eq!(client.dimension(), 768);
    }

    #[test]
    fn test_resolve_huggingface_unsupported() {
        let result = create_embedding_client(&config(
            EmbeddingProvider::HuggingFace,
            "sentence-transformers/all-MiniLM-L6-v2",
        ));
        assert!(matches!(
            result,
            Err(ShopvecError::UnsupportedProvider(_))
        ));
    }
}
