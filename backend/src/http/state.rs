//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::PersonRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for person storage
    pub repository: Arc<dyn PersonRepository>,
    /// Answer duplicate document numbers with 409 instead of 200
    pub duplicate_conflict: bool,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self {
            repository,
            duplicate_conflict: false,
        }
    }

    /// Create application state honouring the server configuration.
    pub fn from_config(repository: Arc<dyn PersonRepository>, config: &ServerConfig) -> Self {
        Self {
            repository,
            duplicate_conflict: config.duplicate_conflict,
        }
    }
}
