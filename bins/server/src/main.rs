//! Imor webhook server
//!
//! Receives Event Grid blob-created deliveries and runs the image pipeline.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imor_api::create_router;
use imor_clients::{SparqlClient, VisionClient, build_http_client};
use imor_core::pipeline::ImageProcessor;
use imor_core::storage::BlobStore;
use imor_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration
    let config = AppConfig::load()?;

    // Blob store
    let blobs = BlobStore::from_connection_string(&config.storage.connection_string)?;
    let storage_provider = blobs.provider().name();
    info!(provider = storage_provider, "Blob store configured");

    // Outbound clients share one connection pool
    let http = build_http_client(&config.http)?;
    let analyzer = VisionClient::new(http.clone(), &config.vision);
    let publisher = SparqlClient::new(http, &config.sparql);
    info!(
        analyze_url = %analyzer.analyze_url(),
        create_url = %publisher.create_url(),
        timeout_secs = config.http.timeout_secs,
        "Remote services configured"
    );

    let processor = ImageProcessor::new(Arc::new(blobs), Arc::new(analyzer), Arc::new(publisher));

    // Create router
    let app = create_router(Arc::new(processor), storage_provider);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
