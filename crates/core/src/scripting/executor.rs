//! Output and error types shared by every hurl invocation.

use std::io;

/// Captured output from one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal or never started).
    pub exit_code: i32,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScriptOutput {
    /// Output for a run whose process could not be started at all.
    ///
    /// The launch error becomes the stderr text so the caller still gets a
    /// result describing what went wrong.
    pub fn launch_failure(err: &ScriptError) -> Self {
        Self {
            stdout: String::new(),
            stderr: err.to_string(),
            exit_code: -1,
            success: false,
            duration_ms: 0,
        }
    }

    /// The result text returned to clients and persisted for jobs.
    pub fn combined(&self) -> String {
        combine_output(&self.stdout, &self.stderr)
    }
}

/// Combine stdout and stderr into one result text.
///
/// stdout comes first. stderr is appended only when non-empty, separated by
/// a single newline only when stdout is non-empty too.
pub fn combine_output(stdout: &str, stderr: &str) -> String {
    let mut output = String::with_capacity(stdout.len() + stderr.len() + 1);
    output.push_str(stdout);
    if !stderr.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(stderr);
    }
    output
}

/// Errors that can occur while running a process.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The program could not be spawned (missing, not executable, ...).
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{program} exited with code {exit_code}: {stderr}")]
    ExecutionFailed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    /// An I/O error while preparing files or waiting on the process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
