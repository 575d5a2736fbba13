//! Application state management

use shopvec_core::{AppConfig, EmbeddingModelConfig, VectorStoreConfig};
use shopvec_ingest::IngestionReport;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

/// Transient wizard session: provider configs staged through the API.
/// Held in memory only and lost on restart.
#[derive(Debug, Default, Clone)]
pub struct WizardSession {
    pub vector_store: Option<VectorStoreConfig>,
    pub embedding_model: Option<EmbeddingModelConfig>,
    pub last_report: Option<IngestionReport>,
}

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Ready status
    pub is_ready: AtomicBool,
    /// Single-flight guard for ingestion runs
    ingestion_in_progress: AtomicBool,
    /// Staged wizard configuration
    pub session: RwLock<WizardSession>,
}

impl AppState {
    /// Create new application state with config
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            is_ready: AtomicBool::new(true),
            ingestion_in_progress: AtomicBool::new(false),
            session: RwLock::new(WizardSession::default()),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if service is ready
    pub fn is_ready(&self) -> bool {
        self.is_ready.load(Ordering::SeqCst)
    }

    /// Try to claim the single ingestion slot. Returns false when a run
    /// is already in flight; the claim must be released with
    /// `end_ingestion`.
    pub fn try_begin_ingestion(&self) -> bool {
        self.ingestion_in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the ingestion slot
    pub fn end_ingestion(&self) {
        self.ingestion_in_progress.store(false, Ordering::SeqCst);
    }

    /// Whether an ingestion run is currently in flight
    pub fn ingestion_in_progress(&self) -> bool {
        self.ingestion_in_progress.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
