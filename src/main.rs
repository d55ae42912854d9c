//! Quill server binary entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::config::{QuillConfig, StoreBackend};
use quill::inference::HttpInferenceClient;
use quill::orchestrator::RequestOrchestrator;
use quill::server::{create_router, AppState};
use quill::store::{ArtifactPersister, ArtifactStore, HttpArtifactStore, LocalArtifactStore};

#[tokio::main]
async fn main() -> quill::error::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = QuillConfig::from_env()?;
    info!(model = %config.inference.model_id, "starting quill");

    let client = HttpInferenceClient::new(&config.inference)?;
    let orchestrator = Arc::new(RequestOrchestrator::new(
        Arc::new(client),
        &config.inference,
    ));

    let store: Arc<dyn ArtifactStore> = match &config.store.backend {
        StoreBackend::Http { endpoint } => Arc::new(HttpArtifactStore::new(endpoint)?),
        StoreBackend::Local { root } => Arc::new(LocalArtifactStore::new(root.clone())),
    };
    let persister = Arc::new(ArtifactPersister::new(store, &config.store));

    let app = create_router(AppState::new(orchestrator, persister));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
