pub mod api; // HTTP surface for the browser dashboard
pub mod config;
pub mod core_state; // Dashboard session state
pub mod demo;
pub mod highlight; // Critical-patient highlight controller
pub mod models;
pub mod patients;
pub mod reminders;
pub mod vitals;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Start the dashboard backend and serve until Ctrl-C.
pub async fn run() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::new());
    let server = api::start_server(core.clone(), config::bind_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Dashboard API listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    server.stop().await;
    core.teardown();
    Ok(())
}
