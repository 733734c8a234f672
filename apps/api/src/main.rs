mod catalog;
mod config;
mod errors;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::loader::{load_catalog, source_from_location};
use crate::config::Config;
use crate::render::Markup;
use crate::routes::build_router;
use crate::state::{AppState, CatalogState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillmap v{}", env!("CARGO_PKG_VERSION"));

    // Load the mapping document once. A failure keeps the service up so the
    // page can show the error instead of an empty selector.
    let source = source_from_location(&config.mapping_source);
    let catalog = match load_catalog(source.as_ref(), config.reference_policy).await {
        Ok(catalog) => CatalogState::Ready(Arc::new(catalog)),
        Err(e) => {
            error!("Failed to load mapping from {}: {e}", source.describe());
            CatalogState::Failed(e.to_string())
        }
    };

    let markup = Markup::new(&config.page_title, &config.relevance_heading)?;

    let state = AppState {
        catalog,
        markup: Arc::new(markup),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
