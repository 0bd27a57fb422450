// ABOUTME: HTTP server lifecycle: binds the listener and serves the assembled router
// ABOUTME: Shuts down gracefully on Ctrl+C or SIGTERM
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::resources::ServerResources;
use crate::routes;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Bookshelf REST server
pub struct BookshelfServer {
    resources: Arc<ServerResources>,
}

impl BookshelfServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources backing this server
    #[must_use]
    pub const fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// Serve the API on `port` until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails while running
    pub async fn run(self, port: u16) -> Result<()> {
        let app = routes::router(&self.resources);
        let address = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;
        info!("HTTP server listening on {}", address);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated with an error")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
