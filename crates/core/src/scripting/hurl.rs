//! Invocations of the external `hurl` binary.
//!
//! A test run is `<binary> --test <dir>/test.hurl`; the health probe is
//! `<binary> --version`. The binary is looked up on `PATH` unless an
//! absolute path is configured.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::process::Command;

use super::executor::{ScriptError, ScriptOutput};
use super::subprocess;

/// File name the script is written to inside its run directory.
pub const SCRIPT_FILE_NAME: &str = "test.hurl";

/// Runs hurl scripts through a configured binary.
#[derive(Debug, Clone)]
pub struct HurlExecutor {
    binary: String,
}

impl HurlExecutor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run the script at `script_path` in test mode.
    ///
    /// A binary that cannot be launched is not an error here: it yields an
    /// unsuccessful [`ScriptOutput`] carrying the launch error as stderr.
    /// Only I/O failures after the process started are returned as `Err`.
    pub async fn run_test(&self, script_path: &Path) -> Result<ScriptOutput, ScriptError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--test").arg(script_path);

        match subprocess::run_command(&mut cmd).await {
            Ok(output) => Ok(output),
            Err(err @ ScriptError::Launch { .. }) => {
                tracing::warn!(binary = %self.binary, error = %err, "Could not launch hurl");
                Ok(ScriptOutput::launch_failure(&err))
            }
            Err(err) => Err(err),
        }
    }

    /// Write `script` into `dir` and run it in test mode.
    pub async fn run_in(&self, dir: &Path, script: &[u8]) -> Result<ScriptOutput, ScriptError> {
        let script_path = write_script(dir, script).await?;
        self.run_test(&script_path).await
    }

    /// Run `script` from a scratch directory that is removed afterwards.
    ///
    /// The directory is deleted once the process has exited, whether the run
    /// succeeded or not.
    pub async fn run_transient(&self, script: &[u8]) -> Result<ScriptOutput, ScriptError> {
        let scratch = tempfile::Builder::new().prefix("hurlrun-").tempdir()?;
        let result = self.run_in(scratch.path(), script).await;
        if let Err(err) = scratch.close() {
            tracing::warn!(error = %err, "Failed to remove scratch directory");
        }
        result
    }

    /// Ask the binary for its version, proving it is installed and runnable.
    pub async fn version(&self) -> Result<String, ScriptError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--version");

        let output = subprocess::run_command(&mut cmd).await?;
        if !output.success {
            return Err(ScriptError::ExecutionFailed {
                program: self.binary.clone(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout.trim().to_string())
    }
}

/// Write `script` to [`SCRIPT_FILE_NAME`] inside `dir`, returning its path.
pub async fn write_script(dir: &Path, script: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join(SCRIPT_FILE_NAME);
    fs::write(&path, script).await?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
