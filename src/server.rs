//! HTTP server initialization and runtime setup.
//!
//! Builds the link repository and caption compositor from configuration and
//! runs the Axum server until a shutdown signal arrives.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::imaging::CaptionCompositor;
use crate::infrastructure::persistence::build_link_repository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the link storage cannot be opened.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let link_repository = build_link_repository(config).await?;
    let link_service = Arc::new(LinkService::new(
        link_repository,
        config.public_base_url.clone(),
    ));

    let compositor = Arc::new(CaptionCompositor::new(
        &config.template_image_path,
        config.fonts_dir.as_deref(),
    ));

    // A missing template only breaks image requests; the rest still serves.
    match compositor.check_template() {
        Ok((width, height)) => tracing::info!("Template image ready ({}x{})", width, height),
        Err(e) => tracing::warn!(
            "Template image unavailable at {}: {}",
            config.template_image_path.display(),
            e
        ),
    }

    Ok(AppState::new(
        link_service,
        compositor,
        config.redirect_delay_seconds,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Link storage cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
