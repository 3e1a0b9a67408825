//! Filesystem-backed store for asynchronous runs.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/<job id>/test.hurl     written when the job is created
//! <root>/<job id>/result.txt    written once, after the run finishes
//! ```
//!
//! A job is pending while its directory exists without a result file and
//! completed once the result file exists. Results are written to a temporary
//! name and renamed into place, so a reader never sees a partial result.
//! Nothing is ever deleted.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::CoreError;
use crate::scripting::hurl::write_script;
use crate::types::{new_job_id, JobId};

/// File name of the final result inside a job directory.
pub const RESULT_FILE_NAME: &str = "result.txt";

const RESULT_TMP_FILE_NAME: &str = "result.txt.tmp";

/// A job whose directory and script have been written.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub dir: PathBuf,
    pub script_path: PathBuf,
}

/// Observable state of an existing job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// The run has not finished yet.
    Pending,
    /// The run finished; holds the result text verbatim.
    Completed(String),
}

#[derive(Debug, Clone)]
pub struct JobStore {
    root: PathBuf,
}

impl JobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the store root if it does not exist yet.
    pub async fn init(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn job_dir(&self, id: JobId) -> PathBuf {
        self.root.join(id.hyphenated().to_string())
    }

    /// Allocate a new job: generate its id, create its directory and
    /// persist the script. The job is pending when this returns.
    pub async fn create(&self, script: &[u8]) -> Result<Job, CoreError> {
        let id = new_job_id();
        let dir = self.job_dir(id);
        fs::create_dir_all(&dir).await?;
        let script_path = write_script(&dir, script).await?;

        tracing::debug!(job_id = %id, dir = %dir.display(), "Job created");
        Ok(Job {
            id,
            dir,
            script_path,
        })
    }

    /// Persist the final result text for `id`, completing the job.
    pub async fn complete(&self, id: JobId, result: &str) -> Result<(), CoreError> {
        let dir = self.job_dir(id);
        let tmp_path = dir.join(RESULT_TMP_FILE_NAME);
        fs::write(&tmp_path, result).await?;
        fs::rename(&tmp_path, dir.join(RESULT_FILE_NAME)).await?;
        Ok(())
    }

    /// Look up a job.
    ///
    /// Returns [`CoreError::NotFound`] when no directory exists for `id`.
    pub async fn status(&self, id: JobId) -> Result<JobStatus, CoreError> {
        let dir = self.job_dir(id);
        match fs::read(dir.join(RESULT_FILE_NAME)).await {
            Ok(bytes) => Ok(JobStatus::Completed(
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if fs::try_exists(&dir).await? {
                    Ok(JobStatus::Pending)
                } else {
                    Err(CoreError::NotFound { entity: "Job", id })
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}
