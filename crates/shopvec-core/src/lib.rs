//! shopvec Core - Domain models and shared types
//!
//! This crate defines the core abstractions used throughout shopvec:
//! - Provider configuration (embedding models, vector stores)
//! - The document model produced by the product loader
//! - Common error types
//! - Application configuration management

pub mod config;
pub mod provider;

pub use config::{AppConfig, ConfigError, IngestSettings, ServerConfig, ShopifyConfig};
pub use provider::{
    AstraMetric, ElasticSimilarity, EmbeddingModelConfig, EmbeddingProvider, FieldError,
    KnnEngine, VectorStoreConfig,
};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for shopvec operations
#[derive(Error, Debug)]
pub enum ShopvecError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    Store(String),

    #[error("Shopify API error: {0}")]
    Shopify(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ShopvecError>;

// ============================================================================
// Document Model
// ============================================================================

/// A parsed unit of source content, ready for embedding and storage.
///
/// One Shopify product record becomes one document (unless a splitter
/// breaks it into chunks). Documents are transient: created by the loader
/// and consumed immediately by the vector store write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (the Shopify product gid, plus a chunk suffix
    /// when produced by a splitter)
    pub id: String,

    /// Text content to embed
    pub content: String,

    /// Metadata stored alongside the vector
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata value
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
