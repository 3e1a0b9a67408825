pub mod health;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::config::RunMode;
use crate::handlers::runs;
use crate::middleware::auth::require_token;
use crate::state::AppState;

/// Build the run routes for the configured mode.
///
/// ```text
/// async:  POST /run              submit, returns job id      (bearer token)
///         GET  /results/{id}     poll result                 (bearer token)
///
/// sync:   POST /run              run inline, returns output
/// ```
///
/// `/results` takes the rest of the path so that extra segments are
/// rejected as a bad request instead of falling through to 404. The bare
/// `/results/` is mounted separately since the wildcard needs a segment.
///
/// The token check wraps each method router, so a request without a valid
/// token gets 401 before method matching can answer 405.
pub fn api_routes(mode: RunMode, state: &AppState) -> Router<AppState> {
    match mode {
        RunMode::Async => {
            let auth = from_fn_with_state(state.clone(), require_token);
            Router::new()
                .route("/run", post(runs::submit_run).layer(auth.clone()))
                .route("/results/", get(runs::get_result_without_id).layer(auth.clone()))
                .route("/results/{*id}", get(runs::get_result).layer(auth))
        }
        RunMode::Sync => Router::new().route("/run", post(runs::run_inline)),
    }
}
