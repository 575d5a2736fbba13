//! shopvec CLI - Command-line interface
//!
//! Usage:
//!   shopvec serve
//!   shopvec fetch-products
//!   shopvec ingest --config run.toml

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use shopvec_api::{create_router, state::AppState};
use shopvec_core::{AppConfig, EmbeddingModelConfig, VectorStoreConfig};
use shopvec_ingest::{ingest_products, ShopifyClient};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "shopvec")]
#[command(about = "Shopify product ingestion into vector stores")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the wizard API server
    Serve,
    /// Fetch products from the Shopify Admin API and print them
    FetchProducts,
    /// Run a one-shot ingestion from a run config file
    Ingest {
        /// Path to a TOML run config with embedding model and vector
        /// store sections
        #[arg(long)]
        config: PathBuf,
        /// Optional JSON products file; fetched from Shopify when absent
        #[arg(long)]
        products: Option<PathBuf>,
    },
}

/// One-shot run input: both provider configs in a single TOML file.
/// This is run input, not persisted state.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunConfig {
    embedding_model: EmbeddingModelConfig,
    vector_store: VectorStoreConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopvec=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await,
        Commands::FetchProducts => fetch_products().await,
        Commands::Ingest { config, products } => ingest(config, products).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = AppConfig::from_env().unwrap_or_default();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("shopvec API server starting on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn fetch_products() -> anyhow::Result<()> {
    let config = AppConfig::from_env().unwrap_or_default();
    let client = ShopifyClient::from_config(&config.shopify)?;
    let payload = client.fetch_products().await?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn ingest(config_path: PathBuf, products_path: Option<PathBuf>) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let run: RunConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    let mut errors = run.embedding_model.validate();
    errors.extend(run.vector_store.validate());
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("{}: {}", err.field, err.message);
        }
        bail!("run config is not valid");
    }

    let app_config = AppConfig::from_env().unwrap_or_default();

    let payload = match products_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            let client = ShopifyClient::from_config(&app_config.shopify)?;
            client.fetch_products().await?
        }
    };

    let report = ingest_products(
        &run.embedding_model,
        &run.vector_store,
        &payload,
        &app_config.ingest,
    )
    .await?;

    println!(
        "Ingested {} documents ({} records written) into {} using {} in {}ms",
        report.documents_loaded,
        report.chunks_written,
        report.store,
        report.model,
        report.elapsed_ms
    );
    Ok(())
}
