//! Personas HTTP Server Binary
//!
//! Loads configuration, creates the in-memory repository, builds the router
//! and serves requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin personas-server
//!
//! # Development mode mounts the Swagger UI at /swagger
//! APP_ENV=development PORT=5000 cargo run --bin personas-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`, `PORT`, `APP_ENV`, `DUPLICATE_CONFLICT`, `PERSONAS_CONFIG`:
//!   see `personas_api::config`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use personas_api::config::ServerConfig;
use personas_api::db::{LocalRepository, PersonRepository};
use personas_api::http::{build_router, docs, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Personas HTTP Server");

    let config = ServerConfig::load()?;
    info!(
        environment = %config.environment,
        duplicate_conflict = config.duplicate_conflict,
        "Configuration loaded"
    );

    let repository: Arc<dyn PersonRepository> = Arc::new(LocalRepository::new());
    let state = AppState::from_config(repository, &config);

    let with_docs = config.environment.is_development();
    let app = build_router(state, with_docs);

    let addr = config.socket_addr()?;
    info!("Server listening on http://{}", addr);
    if with_docs {
        info!("API documentation: http://{}{}", addr, docs::DOCS_PATH);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
