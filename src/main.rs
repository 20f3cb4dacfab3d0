// Main entry point - Dependency injection and poll loop startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::catalog_service::CatalogService;
use crate::application::poll_loop::PollLoop;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::serial_sink::SerialSink;
use crate::infrastructure::simrail_client::SimRailClient;
use crate::presentation::app_state::AppState;
use crate::presentation::chooser::choose_selection;
use crate::presentation::console::run_console;
use crate::presentation::display_board::DisplayBoard;
use crate::presentation::handlers::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the chooser and the renderer
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_app_config()?;

    // Create client (infrastructure layer)
    let client = Arc::new(SimRailClient::new(
        config.api.base_url.clone(),
        config.request_timeout(),
    )?);

    let selection = match config.selection() {
        Some(selection) => selection,
        None => choose_selection(&CatalogService::new(client.clone())).await?,
    };
    tracing::info!(
        "Selected: server {}, train {}, display mode {:?}",
        selection.server_code,
        selection.train,
        config.display.mode
    );

    // Display board and renderers (presentation layer)
    let board = DisplayBoard::new();
    tokio::spawn(run_console(board.subscribe(), config.display.mode));

    if let Some(http) = &config.http {
        let state = Arc::new(AppState {
            board: board.clone(),
            selection: selection.clone(),
        });
        let listener = tokio::net::TcpListener::bind(http.bind)
            .await
            .with_context(|| format!("Failed to bind {}", http.bind))?;
        tracing::info!("Serving signal state on http://{}", http.bind);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, build_router(state)).await {
                tracing::error!("HTTP server stopped: {}", e);
            }
        });
    }

    // Poll loop (application layer)
    let mut poll_loop = PollLoop::new(
        config.poll_settings(),
        selection,
        client,
        Arc::new(board),
    );

    if let Some(serial) = &config.serial {
        let sink = SerialSink::new(serial.port.clone(), serial.baud_rate);
        sink.link_check().await;
        poll_loop = poll_loop.with_external_sink(Arc::new(sink));
    }

    poll_loop
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
