//! SmartRF Cover - time-estimated position control for IR/RF covers
//!
//! This is the main entry point for the smartrf-cover service.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use smartrf_cover::{
    api::create_router,
    config::Config,
    services::FileDescriptorLoader,
    setup::setup_cover,
    state::AppState,
    tasks::{event_channel, spawn_cover_runtime},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("smartrf_cover={},tower_http=info", config.log_level()))
        .init();

    info!("Starting smartrf-cover v{}", env!("CARGO_PKG_VERSION"));
    let cover_config = config.cover_config();
    info!(
        "Configuration: host={}, port={}, device_code={}, travel_time={:?}",
        config.host, config.port, cover_config.device_code, cover_config.travel_time
    );

    let loader =
        FileDescriptorLoader::with_source(config.codes_dir.clone(), config.codes_source.clone());
    let (events, receiver) = event_channel();
    let Some(controller) = setup_cover(&cover_config, &loader, events.clone()).await else {
        anyhow::bail!("cover {} could not be set up", cover_config.name);
    };

    // Start the cover runtime that owns the controller
    let (cover, runtime) = spawn_cover_runtime(controller, events, receiver);

    let state = Arc::new(AppState::new(cover, config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /cover          - Current cover snapshot");
    info!("  POST /cover/open     - Open the cover");
    info!("  POST /cover/close    - Close the cover");
    info!("  POST /cover/stop     - Stop the cover");
    info!("  POST /cover/position - Move to a position");
    info!("  POST /cover/sensor   - Report a position sensor state");
    info!("  GET  /status         - Snapshot with server metadata");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    runtime.abort();
    info!("Server shutdown complete");
    Ok(())
}
