//! Provider configuration model
//!
//! Discriminated configuration for embedding models and vector stores.
//! Validation runs at the API/CLI boundary; the resolver and dispatcher
//! trust the configs they receive.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Validation
// ============================================================================

/// A single form-level validation failure, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required."))
    }
}

fn check_required(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
    }
}

fn check_dimensions(errors: &mut Vec<FieldError>, dimensions: Option<u32>) {
    if let Some(dims) = dimensions {
        if dims == 0 || dims > 5000 {
            errors.push(FieldError::new(
                "dimensions",
                "Dimensions must be a positive integer less than 5000.",
            ));
        }
    }
}

// ============================================================================
// Embedding Model Configuration
// ============================================================================

/// Supported embedding model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EmbeddingProvider {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Google,
    HuggingFace,
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "OpenAI"),
            Self::Google => write!(f, "Google"),
            Self::HuggingFace => write!(f, "HuggingFace"),
        }
    }
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = crate::ShopvecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "google" => Ok(Self::Google),
            "huggingface" => Ok(Self::HuggingFace),
            _ => Err(crate::ShopvecError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl EmbeddingProvider {
    /// Model names advertised for this provider. HuggingFace models are
    /// listed for the selection UI even though resolution is unsupported.
    pub fn known_models(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &[
                "text-embedding-3-small",
                "text-embedding-3-large",
                "text-embedding-ada-002",
            ],
            Self::Google => &["text-embedding-004"],
            Self::HuggingFace => &[
                "sentence-transformers/all-MiniLM-L6-v2",
                "sentence-transformers/distilbert-base-nli-mean-tokens",
                "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2",
                "BAAI/bge-m3",
                "intfloat/multilingual-e5-large",
                "jinaai/jina-embeddings-v2-base-en",
                "mixedbread-ai/mxbai-embed-large-v1",
            ],
        }
    }
}

/// Embedding model configuration collected from the setup form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingModelConfig {
    pub provider: EmbeddingProvider,

    pub model_name: String,

    pub api_key: String,

    /// Optional output dimensionality (OpenAI v3 models only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

impl EmbeddingModelConfig {
    /// Form-level validation: required fields and the model-belongs-to-
    /// provider invariant. Empty result means the config is acceptable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        check_required(&mut errors, "apiKey", &self.api_key);
        check_required(&mut errors, "modelName", &self.model_name);

        if !self.model_name.trim().is_empty()
            && !self
                .provider
                .known_models()
                .contains(&self.model_name.as_str())
        {
            errors.push(FieldError::new(
                "modelName",
                format!(
                    "{} is not a known {} embedding model.",
                    self.model_name, self.provider
                ),
            ));
        }

        check_dimensions(&mut errors, self.dimensions);

        errors
    }
}

// ============================================================================
// Vector Store Configuration
// ============================================================================

/// Similarity metric accepted by the Astra Data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AstraMetric {
    Cosine,
    Euclidean,
    DotProduct,
}

impl AstraMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::DotProduct => "dot_product",
        }
    }
}

/// KNN engine accepted by the Elasticsearch dense_vector mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum KnnEngine {
    Hnsw,
}

impl KnnEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hnsw => "hnsw",
        }
    }
}

/// Similarity function accepted by the Elasticsearch dense_vector mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElasticSimilarity {
    L2Norm,
    DotProduct,
    Cosine,
}

impl ElasticSimilarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2Norm => "l2_norm",
            Self::DotProduct => "dot_product",
            Self::Cosine => "cosine",
        }
    }
}

/// Vector store configuration, tagged by provider.
///
/// Exactly one variant is active per ingestion call. Dispatch over this
/// enum is exhaustive so an added provider cannot silently fall through
/// to an error path. Milvus is declared for the selection UI but has no
/// dispatcher branch yet; connecting to it fails with
/// `ShopvecError::UnsupportedProvider`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "provider")]
pub enum VectorStoreConfig {
    #[serde(rename_all = "camelCase")]
    Pinecone { api_key: String, index_name: String },

    #[serde(rename_all = "camelCase")]
    Astra {
        token: String,
        endpoint: String,
        collection: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimensions: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        similarity_metric: Option<AstraMetric>,
    },

    #[serde(rename_all = "camelCase")]
    Elasticsearch {
        url: String,
        index_name: String,
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        engine: Option<KnnEngine>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        similarity: Option<ElasticSimilarity>,
    },

    #[serde(rename_all = "camelCase")]
    Milvus { api_key: String, url: String },
}

impl VectorStoreConfig {
    /// Provider tag, as shown in the selection UI and logs
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Pinecone { .. } => "Pinecone",
            Self::Astra { .. } => "Astra",
            Self::Elasticsearch { .. } => "Elasticsearch",
            Self::Milvus { .. } => "Milvus",
        }
    }

    /// Form-level validation of required fields per variant
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match self {
            Self::Pinecone { api_key, index_name } => {
                check_required(&mut errors, "apiKey", api_key);
                check_required(&mut errors, "indexName", index_name);
            }
            Self::Astra {
                token,
                endpoint,
                collection,
                dimensions,
                ..
            } => {
                check_required(&mut errors, "token", token);
                check_required(&mut errors, "endpoint", endpoint);
                check_required(&mut errors, "collection", collection);
                check_dimensions(&mut errors, *dimensions);
            }
            Self::Elasticsearch {
                url,
                index_name,
                api_key,
                ..
            } => {
                check_required(&mut errors, "url", url);
                check_required(&mut errors, "indexName", index_name);
                check_required(&mut errors, "apiKey", api_key);
            }
            Self::Milvus { api_key, url } => {
                check_required(&mut errors, "apiKey", api_key);
                check_required(&mut errors, "url", url);
            }
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
