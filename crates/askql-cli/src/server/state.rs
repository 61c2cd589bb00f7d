//! Shared session state for the server.
//!
//! One logical session per process: the state starts empty, the connect and
//! generate actions mutate it, and it is discarded when the process exits.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::db::DbHandle;
use crate::llm::CompletionClient;

/// Server configuration derived from CLI arguments and the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Completion model name
    pub model: String,
    /// Port to listen on
    pub port: u16,
    /// Whether to open the browser on startup
    pub open_browser: bool,
}

/// Shared session state behind the handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// The completion collaborator, fixed for the process lifetime.
    pub llm: Arc<dyn CompletionClient>,
    /// The session's single live connection handle, if any. Reconnecting
    /// replaces it wholesale; the old pool is dropped and left to sqlx.
    pub db: RwLock<Option<DbHandle>>,
    /// Last generated query, for status display.
    pub last_sql: RwLock<Option<String>>,
}

impl AppState {
    /// Create empty session state around a completion client.
    pub fn new(config: ServerConfig, llm: Arc<dyn CompletionClient>) -> Self {
        Self {
            config,
            llm,
            db: RwLock::new(None),
            last_sql: RwLock::new(None),
        }
    }
}
