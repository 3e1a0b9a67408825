use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /health -- checks that the hurl binary can be run.
///
/// Never requires authentication.
async fn health_check(State(state): State<AppState>) -> Response {
    let executor = state.orchestrator.executor();
    match executor.version().await {
        Ok(version) => {
            tracing::debug!(%version, "Health check passed");
            "ok".into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} not available", executor.binary()),
            )
                .into_response()
        }
    }
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
