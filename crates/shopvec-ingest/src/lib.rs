//! shopvec Ingest - Ingestion orchestrator
//!
//! Composes the embedding resolver and the vector store dispatcher:
//! parse the raw product payload into documents, run the splitter stage,
//! and hand everything to the store's bulk load in one call.
//!
//! The whole pipeline is awaited and reports completion to the caller;
//! there is no fire-and-forget path. A single run makes exactly one bulk
//! write, and nothing deduplicates against earlier runs: calling
//! `ingest_products` twice with identical input writes twice.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use serde_json::Value;
use shopvec_core::{EmbeddingModelConfig, IngestSettings, Result, VectorStoreConfig};
use shopvec_embed::{create_embedding_client, EmbeddingClient};
use shopvec_store::{connect, VectorStore};
use std::time::Instant;

pub mod loader;
pub mod shopify;
pub mod splitter;

pub use shopify::ShopifyClient;
pub use splitter::{CharacterSplitter, DocumentSplitter, PassthroughSplitter};

// ============================================================================
// Report
// ============================================================================

/// Outcome of a completed ingestion run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestionReport {
    /// Products parsed out of the payload
    pub documents_loaded: usize,

    /// Records written by the store's bulk call
    pub chunks_written: u64,

    /// Vector store provider that received the write
    pub store: String,

    /// Embedding model used
    pub model: String,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Ingestion orchestrator over resolved collaborators
pub struct Orchestrator {
    embedder: Box<dyn EmbeddingClient>,
    store: Box<dyn VectorStore>,
    splitter: Box<dyn DocumentSplitter>,
}

impl Orchestrator {
    /// Create an orchestrator with the default passthrough splitter
    pub fn new(embedder: Box<dyn EmbeddingClient>, store: Box<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            splitter: Box::new(PassthroughSplitter),
        }
    }

    /// Replace the splitter stage
    pub fn with_splitter(mut self, splitter: Box<dyn DocumentSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Run one ingestion: parse, split, bulk-write. Single attempt, no
    /// retry; provider failures propagate unchanged.
    pub async fn run(&self, raw_products: &Value) -> Result<IngestionReport> {
        let start = Instant::now();

        let documents = loader::parse_products(raw_products)?;
        let documents_loaded = documents.len();

        let chunks = self.splitter.split(documents);

        tracing::info!(
            store = self.store.name(),
            model = self.embedder.model(),
            documents = documents_loaded,
            chunks = chunks.len(),
            "starting ingestion run"
        );

        let chunks_written = self
            .store
            .load_documents(self.embedder.as_ref(), &chunks)
            .await?;

        let report = IngestionReport {
            documents_loaded,
            chunks_written,
            store: self.store.name().to_string(),
            model: self.embedder.model().to_string(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            written = report.chunks_written,
            elapsed_ms = report.elapsed_ms,
            "ingestion run complete"
        );

        Ok(report)
    }
}

/// Resolve both providers from config and run one ingestion.
///
/// Config validation belongs to the caller; unrecognized or unsupported
/// provider tags surface here as `UnsupportedProvider`.
pub async fn ingest_products(
    embedding_config: &EmbeddingModelConfig,
    store_config: &VectorStoreConfig,
    raw_products: &Value,
    settings: &IngestSettings,
) -> Result<IngestionReport> {
    let embedder = create_embedding_client(embedding_config)?;
    let store = connect(store_config)?;

    let mut orchestrator = Orchestrator::new(embedder, store);
    if settings.split_documents {
        orchestrator = orchestrator.with_splitter(Box::new(CharacterSplitter::new(
            settings.chunk_size,
            settings.chunk_overlap,
        )));
    }

    orchestrator.run(raw_products).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use shopvec_core::{Document, EmbeddingProvider, ShopvecError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingEmbedder {
        batches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EmbeddingClient for CountingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0; 4])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
        }

        fn dimension(&self) -> usize {
            4
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    struct RecordingStore {
        loads: Arc<AtomicUsize>,
        last_batch_len: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl VectorStore for RecordingStore {
        fn name(&self) -> &'static str {
            "Recording"
        }

        async fn load_documents(
            &self,
            embedder: &dyn EmbeddingClient,
            documents: &[Document],
        ) -> Result<u64> {
            let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
            embedder.embed_batch(&texts).await?;
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.last_batch_len.store(documents.len(), Ordering::SeqCst);
            Ok(documents.len() as u64)
        }
    }

    fn orchestrator_with_counters() -> (Orchestrator, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let batches = Arc::new(AtomicUsize::new(0));
        let loads = Arc::new(AtomicUsize::new(0));
        let orchestrator = Orchestrator::new(
            Box::new(CountingEmbedder {
                batches: batches.clone(),
            }),
            Box::new(RecordingStore {
                loads: loads.clone(),
                last_batch_len: Arc::new(AtomicUsize::new(0)),
            }),
        );
        (orchestrator, batches, loads)
    }

    #[tokio::test]
    async fn test_single_product_single_bulk_write() {
        let (orchestrator, batches, loads) = orchestrator_with_counters();

        let payload = json!([{ "id": 1, "title": "Shirt" }]);
        let report = orchestrator.run(&payload).await.unwrap();

        assert_eq!(report.documents_loaded, 1);
        assert_eq!(report.chunks_written, 1);
        assert_eq!(batches.load(Ordering::SeqCst), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeat_runs_are_independent_writes() {
        let (orchestrator, _batches, loads) = orchestrator_with_counters();

        let payload = json!([{ "id": 1, "title": "Shirt" }]);
        orchestrator.run(&payload).await.unwrap();
        orchestrator.run(&payload).await.unwrap();

        // no dedup against prior writes
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_store() {
        let (orchestrator, _batches, loads) = orchestrator_with_counters();

        let payload = json!({ "orders": [] });
        assert!(orchestrator.run(&payload).await.is_err());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ingest_products_rejects_unsupported_embedding_provider() {
        let embedding = EmbeddingModelConfig {
            provider: EmbeddingProvider::HuggingFace,
            model_name: "BAAI/bge-m3".to_string(),
            api_key: "k1".to_string(),
            dimensions: None,
        };
        let store = VectorStoreConfig::Pinecone {
            api_key: "k2".to_string(),
            index_name: "idx".to_string(),
        };

        let result = ingest_products(
            &embedding,
            &store,
            &json!([{ "id": 1, "title": "Shirt" }]),
            &IngestSettings::default(),
        )
        .await;

        assert!(matches!(result, Err(ShopvecError::UnsupportedProvider(_))));
    }
}
