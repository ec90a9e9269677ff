use clap::Parser;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genoproxy::{
    Config,
    client::BackendClient,
    handlers::{AppState, create_router},
    registry::BackendRegistry,
    wiki::SnpediaClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = Arc::new(BackendRegistry::from_config(&config)?);
    let wiki = Arc::new(SnpediaClient::new(
        config.snpedia_api_url.clone(),
        config.snpedia_page_url.clone(),
        config.timeout(),
    )?);

    let state = AppState {
        registry: registry.clone(),
        client: BackendClient::new(config.timeout())?,
        wiki,
    };

    let app = create_router(state);

    // Static assets are served for anything the API does not claim
    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };
    let app = app.layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting genoproxy on {}", addr);
    for backend in registry.backends() {
        tracing::info!(id = %backend.id, datasets = backend.datasets.len(), "backend registered");
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
