//! Scoped execution of external renderer processes.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use log::debug;
use tokio::process::Command;

use crate::errors::RenderError;

const STDERR_TAIL: usize = 800;

/// Runs `command` to completion within `timeout`.
///
/// The child is killed if the timeout elapses (the command is built with
/// `kill_on_drop`). A non-zero exit is reported with the tail of stderr, or of
/// stdout when stderr is empty (LaTeX writes its diagnostics there).
pub(crate) async fn run_scoped(
    backend: &'static str,
    mut command: Command,
    timeout: Duration,
) -> Result<Output, RenderError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = command.as_std().get_program().to_string_lossy().to_string();
    debug!("[{}] launching {}", backend, program);

    let child = command.spawn().map_err(|source| RenderError::Launch {
        backend,
        command: program.clone(),
        source,
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => return Err(RenderError::Timeout { backend, timeout }),
    };

    if !output.status.success() {
        let diagnostics = if output.stderr.is_empty() {
            &output.stdout
        } else {
            &output.stderr
        };
        return Err(RenderError::ProcessFailed {
            backend,
            status: output.status.to_string(),
            stderr: tail(&String::from_utf8_lossy(diagnostics), STDERR_TAIL),
        });
    }
    Ok(output)
}

/// Reads the produced document, failing when it is missing or empty.
pub(crate) async fn read_artifact(backend: &'static str, path: &Path) -> Result<Vec<u8>, RenderError> {
    match tokio::fs::read(path).await {
        Ok(bytes) if !bytes.is_empty() => Ok(bytes),
        Ok(_) => Err(RenderError::MissingArtifact { backend }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RenderError::MissingArtifact { backend })
        }
        Err(e) => Err(RenderError::Io(e)),
    }
}

fn tail(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= max_chars {
        return trimmed.to_string();
    }
    trimmed.chars().skip(count - max_chars).collect()
}
