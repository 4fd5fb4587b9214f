//! Intake Wizard server
//!
//! Hosts wizard sessions over HTTP and forwards composed intake messages to
//! the configured downstream consumer.

use intake_wizard::api::{create_router, AppState};
use intake_wizard::config::HostConfig;
use intake_wizard::delivery::{forwarder_from_config, run_forwarder};
use intake_wizard::sessions::run_sweeper;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_wizard=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = HostConfig::from_env();

    // Outbound delivery
    let (outbound_tx, outbound_rx) = mpsc::channel(config.outbound_buffer);
    let forwarder = forwarder_from_config(&config);
    tracing::info!(forwarder = forwarder.name(), "Outbound forwarder initialized");
    tokio::spawn(run_forwarder(outbound_rx, forwarder));

    // Create application state
    let state = AppState::new(outbound_tx, config.session_ttl);

    // Idle session eviction
    tracing::info!(
        ttl_secs = config.session_ttl.as_secs(),
        "Idle session sweeper started"
    );
    let sweep_interval = config.sweep_interval();
    tokio::spawn(run_sweeper(state.sessions.clone(), sweep_interval));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Intake wizard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
