use std::sync::Arc;

use crate::config::ServerConfig;
use crate::scripting::orchestrator::RunOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the bearer secret.
    pub config: Arc<ServerConfig>,
    /// Runs scripts, inline or as background jobs.
    pub orchestrator: Arc<RunOrchestrator>,
}
