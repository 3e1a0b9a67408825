//! Spawning a child process and capturing its output.
//!
//! [`run_command`] is the only place a child is spawned. Callers build the
//! [`tokio::process::Command`] (program and arguments) and hand it over.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptOutput};

/// Spawn `cmd`, capture stdout and stderr separately, and wait for it to exit.
///
/// No timeout is applied and the child is not killed if the returned future
/// is dropped: a started run always runs to completion.
pub async fn run_command(cmd: &mut Command) -> Result<ScriptOutput, ScriptError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let start = Instant::now();

    let mut child = cmd
        .spawn()
        .map_err(|source| ScriptError::Launch { program, source })?;

    // Drain both pipes while waiting so a chatty child cannot block on a
    // full pipe buffer.
    let stdout_task = tokio::spawn(read_stream(child.stdout.take()));
    let stderr_task = tokio::spawn(read_stream(child.stderr.take()));

    let status = child.wait().await?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let stdout_bytes = stdout_task.await.unwrap_or_default();
    let stderr_bytes = stderr_task.await.unwrap_or_default();

    Ok(ScriptOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
        exit_code: status.code().unwrap_or(-1),
        success: status.success(),
        duration_ms,
    })
}

/// Read an entire output stream into a byte buffer.
///
/// A read error keeps whatever arrived before it.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        if let Err(e) = h.read_to_end(&mut buf).await {
            tracing::warn!(error = %e, bytes_read = buf.len(), "Failed to read process output");
        }
    }
    buf
}
