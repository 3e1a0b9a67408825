//! Central run orchestrator service.
//!
//! Held in [`AppState`](crate::state::AppState) as an `Arc<RunOrchestrator>`.

use hurlrun_core::jobs::{Job, JobStatus, JobStore};
use hurlrun_core::scripting::executor::ScriptOutput;
use hurlrun_core::scripting::hurl::HurlExecutor;
use hurlrun_core::types::JobId;

use crate::error::{AppError, AppResult};

/// Runs hurl scripts either inline or as detached background jobs.
///
/// Background jobs follow this lifecycle:
/// 1. Create the job directory and persist the script.
/// 2. Spawn a detached task and return the job id.
/// 3. The task runs hurl and writes the combined output as the result.
///
/// There is no limit on concurrently running jobs and no cancellation.
pub struct RunOrchestrator {
    store: JobStore,
    executor: HurlExecutor,
}

impl RunOrchestrator {
    pub fn new(store: JobStore, executor: HurlExecutor) -> Self {
        Self { store, executor }
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn executor(&self) -> &HurlExecutor {
        &self.executor
    }

    /// Persist `script` as a new job and start running it in the background.
    ///
    /// Returns as soon as the job directory and script are written.
    pub async fn submit(&self, script: &[u8]) -> AppResult<JobId> {
        let job = self.store.create(script).await?;
        let id = job.id;

        let store = self.store.clone();
        let executor = self.executor.clone();
        tokio::spawn(async move {
            execute_job(&store, &executor, job).await;
        });

        tracing::info!(job_id = %id, "Job submitted");
        Ok(id)
    }

    /// Run `script` to completion and return its output.
    ///
    /// The run happens on its own task: if the caller goes away, the process
    /// still runs to the end and its scratch directory is still removed.
    pub async fn run_inline(&self, script: Vec<u8>) -> AppResult<ScriptOutput> {
        let executor = self.executor.clone();
        let handle = tokio::spawn(async move { executor.run_transient(&script).await });

        let output = handle
            .await
            .map_err(|e| AppError::InternalError(format!("Run task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Run failed: {e}")))?;

        tracing::info!(
            exit_code = output.exit_code,
            success = output.success,
            duration_ms = output.duration_ms,
            "Inline run finished"
        );
        Ok(output)
    }

    /// Current state of a job; `NotFound` if it was never created.
    pub async fn job_status(&self, id: JobId) -> AppResult<JobStatus> {
        Ok(self.store.status(id).await?)
    }
}

/// Body of the background task owning one job.
///
/// This task is the only writer of the job's result file.
async fn execute_job(store: &JobStore, executor: &HurlExecutor, job: Job) {
    let result_text = match executor.run_test(&job.script_path).await {
        Ok(output) => {
            if output.success {
                tracing::info!(
                    job_id = %job.id,
                    duration_ms = output.duration_ms,
                    "Job finished"
                );
            } else {
                tracing::warn!(
                    job_id = %job.id,
                    exit_code = output.exit_code,
                    duration_ms = output.duration_ms,
                    "Job finished with failure"
                );
            }
            output.combined()
        }
        Err(err) => {
            tracing::error!(job_id = %job.id, error = %err, "Error running hurl");
            err.to_string()
        }
    };

    if let Err(err) = store.complete(job.id, &result_text).await {
        tracing::error!(job_id = %job.id, error = %err, "Failed to write job result");
    }
}
