// ABOUTME: Server binary: loads configuration, initializes logging, and serves the REST API
// ABOUTME: The listen port can be overridden on the command line
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Bookshelf Server Binary
//!
//! Starts the bookshelf REST API against the configured SQLite database.

use anyhow::Result;
use bookshelf_server::{
    config::environment::ServerConfig, logging, resources::ServerResources,
    server::BookshelfServer,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bookshelf-server")]
#[command(about = "Bookshelf - REST API for books, reviews, reading statuses, and rankings")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting Bookshelf API");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::from_config(config).await?);
    info!("Database ready at {}", resources.config.database.url);

    display_available_endpoints(port);

    if let Err(e) = BookshelfServer::new(resources).run(port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Log the endpoint table at startup
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let base = format!("http://{host}:{port}");

    info!("=== Available API Endpoints ===");
    info!("Health:        GET  {base}/health, {base}/ready");
    info!("Books:         GET  {base}/api/books/{{isbn}}, POST {base}/api/books");
    info!("Search:        GET  {base}/api/books/search/title/{{title}}, /search/author/{{author}}");
    info!("Rankings:      GET  {base}/api/books/highest-rated, /recently-updated, /popular");
    info!("Reviews:       GET|POST|PUT {base}/api/reviews");
    info!("Statuses:      GET  {base}/api/statuses/{{username}}, POST|PUT {base}/api/statuses");
    info!("Users:         POST {base}/api/users, POST {base}/api/users/login");
    info!("=== End of Endpoint List ===");
}
