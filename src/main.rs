use color_eyre::Result;
use std::sync::Arc;

mod adapters;
mod application;
mod domain;
mod ports;

use adapters::{
    http::{CalendarHandler, CalendarServer},
    store::InMemoryTaskStore,
};
use application::{command, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize color-eyre for better error reporting
    color_eyre::install()?;

    let matches = command().get_matches();
    let config = ServerConfig::from_matches(&matches);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .init();

    // The store lives for the whole process and is shared by every connection
    let store = Arc::new(InMemoryTaskStore::new());
    let handler = CalendarHandler::new(store);

    let server = CalendarServer::bind(config.listen_addr(), handler).await?;
    let port = server.local_addr()?.port();

    tracing::info!("Server running on http://localhost:{}", port);
    tracing::info!("GUI server expected on port {}", config.gui_port);

    server.run_until(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving until killed.
        std::future::pending::<()>().await;
    }
}
