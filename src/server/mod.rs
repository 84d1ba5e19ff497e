// src/server/mod.rs
//! Gourmet HTTP server - recipe catalog API
//!
//! This module provides an HTTP server that:
//! - Registers users and stores Argon2 password hashes
//! - Issues signed bearer tokens on login
//! - Serves the recipe catalog (create, list with filters, update)
//!
//! Everything handlers need is built once at startup and carried in
//! [`ServerState`]; there is no process-global state.

mod config;
mod handlers;
mod routes;

pub use config::{GourmetConfig, parse_duration};
pub use handlers::{ApiError, ApiResult, MessageResponse, SharedState};
pub use routes::create_router;

use crate::auth::TokenSigner;
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the gourmet database
    pub db_path: PathBuf,
    /// Secret used to sign bearer tokens
    pub token_secret: Vec<u8>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            db_path: PathBuf::from("/var/lib/gourmet/gourmet.db"),
            token_secret: rand::random::<[u8; 32]>().to_vec(),
            token_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

/// Shared server state
///
/// Built once in [`run_server`] and handed to every handler as an
/// `Arc`. Handlers open their own database connections through
/// [`ServerState::open_db`] from inside `spawn_blocking`.
pub struct ServerState {
    pub config: ServerConfig,
    /// Issues and verifies bearer tokens
    pub tokens: TokenSigner,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let tokens = TokenSigner::new(&config.token_secret, config.token_ttl);

        Self { config, tokens }
    }

    /// Open a connection to the gourmet database
    pub fn open_db(&self) -> crate::Result<rusqlite::Connection> {
        crate::db::open(&self.config.db_path)
    }
}

/// Start the Gourmet server
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting Gourmet server on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);
    tracing::info!("Token lifetime: {:?}", config.token_ttl);

    // Make sure the database exists and is at the current schema
    crate::db::init(&config.db_path)?;

    let state = Arc::new(ServerState::new(config.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Gourmet is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
