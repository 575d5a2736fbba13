//! shopvec Store - Vector store dispatcher
//!
//! Maps a `VectorStoreConfig` to a concrete vector store client and
//! performs one-shot bulk document loads. Pinecone, Astra, and
//! Elasticsearch are implemented; Milvus is declared in the config model
//! but connecting to it fails with `UnsupportedProvider`.
//!
//! There is no rollback or partial-failure handling: a bulk write that
//! fails midway leaves the store in an unspecified partial state.

use async_trait::async_trait;
use shopvec_core::{Document, Result, ShopvecError, VectorStoreConfig};
use shopvec_embed::EmbeddingClient;

pub mod astra;
pub mod elasticsearch;
pub mod pinecone;

pub use astra::AstraStore;
pub use elasticsearch::ElasticsearchStore;
pub use pinecone::PineconeStore;

// ============================================================================
// Vector Store Trait
// ============================================================================

/// Trait for vector store bulk loading
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Provider name, for logs and reports
    fn name(&self) -> &'static str;

    /// Embed the documents and bulk-write them into the store.
    ///
    /// Returns the number of records written. Embeddings are computed
    /// here, inside the load routine, so the caller hands over raw
    /// documents and a resolved embedding client.
    async fn load_documents(
        &self,
        embedder: &dyn EmbeddingClient,
        documents: &[Document],
    ) -> Result<u64>;
}

// ============================================================================
// Factory function
// ============================================================================

/// Dispatch a vector store client by the config's provider tag.
///
/// The match is exhaustive: adding a provider variant without a branch
/// here is a compile error, not a silent fall-through.
pub fn connect(config: &VectorStoreConfig) -> Result<Box<dyn VectorStore>> {
    match config {
        VectorStoreConfig::Pinecone { api_key, index_name } => {
            Ok(Box::new(PineconeStore::new(api_key, index_name)))
        }
        VectorStoreConfig::Astra {
            token,
            endpoint,
            collection,
            dimensions,
            similarity_metric,
        } => Ok(Box::new(AstraStore::new(
            token,
            endpoint,
            collection,
            *dimensions,
            *similarity_metric,
        ))),
        VectorStoreConfig::Elasticsearch {
            url,
            index_name,
            api_key,
            engine,
            similarity,
        } => Ok(Box::new(ElasticsearchStore::new(
            url,
            index_name,
            api_key,
            *engine,
            *similarity,
        ))),
        VectorStoreConfig::Milvus { .. } => Err(ShopvecError::UnsupportedProvider(
            "Milvus vector stores are not supported yet".to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopvec_core::{AstraMetric, ElasticSimilarity, KnnEngine};

    #[test]
    fn test_dispatch_pinecone() {
        let config = VectorStoreConfig::Pinecone {
            api_key: "k2".to_string(),
            index_name: "idx".to_string(),
        };
        let store = connect(&config).unwrap();
        assert_eq!(store.name(), "Pinecone");
    }

    #[test]
    fn test_dispatch_astra() {
        let config = VectorStoreConfig::Astra {
            token: "t".to_string(),
            endpoint: "https://db.apps.astra.datastax.com".to_string(),
            collection: "products".to_string(),
            dimensions: Some(1536),
            similarity_metric: Some(AstraMetric::Cosine),
        };
        let store = connect(&config).unwrap();
        assert_eq!(store.name(), "Astra");
    }

    #[test]
    fn test_dispatch_elasticsearch() {
        let config = VectorStoreConfig::Elasticsearch {
            url: "https://es.example.com:9200".to_string(),
            index_name: "products".to_string(),
            api_key: "k".to_string(),
            engine: Some(KnnEngine::Hnsw),
            similarity: Some(ElasticSimilarity::Cosine),
        };
        let store = connect(&config).unwrap();
        assert_eq!(store.name(), "Elasticsearch");
    }

    #[test]
    fn test_dispatch_milvus_unsupported() {
        let config = VectorStoreConfig::Milvus {
            api_key: "k".to_string(),
            url: "https://milvus.example.com".to_string(),
        };
        assert!(matches!(
            connect(&config),
            Err(ShopvecError::UnsupportedProvider(_))
        ));
    }
}
