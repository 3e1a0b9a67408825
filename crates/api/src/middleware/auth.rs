//! Static bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use hurlrun_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reject the request unless it carries `Authorization: Bearer <API_TOKEN>`.
///
/// Mount it as a layer on a method router so it also wraps the 405
/// fallback:
///
/// ```ignore
/// let auth = axum::middleware::from_fn_with_state(state.clone(), require_token);
/// Router::new().route("/run", post(submit_run).layer(auth));
/// ```
///
/// A missing secret in the configuration rejects every request with a 500
/// rather than letting it through.
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    check_bearer(state.config.api_token.as_deref(), request.headers())?;
    Ok(next.run(request).await)
}

fn check_bearer(expected: Option<&str>, headers: &HeaderMap) -> AppResult<()> {
    let expected = expected
        .ok_or_else(|| AppError::InternalError("API_TOKEN is not configured".into()))?;

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing or invalid Authorization header".into(),
            ))
        })?;

    if token != expected {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid API token".into(),
        )));
    }

    Ok(())
}
