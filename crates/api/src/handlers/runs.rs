//! Handlers for submitting runs and fetching their results.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use hurlrun_core::jobs::JobStatus;
use hurlrun_core::types::{parse_job_id, JobId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for an accepted asynchronous run.
#[derive(Debug, Serialize)]
pub struct RunAccepted {
    pub id: JobId,
}

/// Response while a job has not finished yet.
#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub status: &'static str,
}

fn require_script(body: &Bytes) -> AppResult<()> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Request body cannot be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /run (async mode)
///
/// Persist the raw script as a new job and run it in the background.
/// Responds with `{"id": "<uuid>"}` without waiting for the run.
pub async fn submit_run(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RunAccepted>> {
    require_script(&body)?;
    let id = state.orchestrator.submit(&body).await?;
    Ok(Json(RunAccepted { id }))
}

/// POST /run (sync mode)
///
/// Run the raw script and respond with the combined output as plain text:
/// 200 if hurl exited zero, 400 otherwise.
pub async fn run_inline(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    require_script(&body)?;
    let output = state.orchestrator.run_inline(body.to_vec()).await?;

    let status = if output.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, output.combined()).into_response())
}

/// GET /results/{id} (async mode)
///
/// 200 with the result text once the job finished (whatever its outcome),
/// 202 `{"status": "pending"}` before that.
pub async fn get_result(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    result_response(&state, &path).await
}

/// GET /results/ (async mode)
///
/// An empty id is not a UUID.
pub async fn get_result_without_id(State(state): State<AppState>) -> AppResult<Response> {
    result_response(&state, "").await
}

async fn result_response(state: &AppState, raw_id: &str) -> AppResult<Response> {
    // The wildcard capture holds everything after `/results/`, so any
    // remaining slash means an empty or extra segment.
    if raw_id.contains('/') {
        return Err(AppError::BadRequest("Invalid path".into()));
    }
    let id = parse_job_id(raw_id)?;

    match state.orchestrator.job_status(id).await? {
        JobStatus::Pending => Ok((
            StatusCode::ACCEPTED,
            Json(PendingResponse { status: "pending" }),
        )
            .into_response()),
        JobStatus::Completed(text) => Ok(text.into_response()),
    }
}
