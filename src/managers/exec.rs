//! Shared subprocess plumbing for the concrete providers.

use crate::error::{CardboardError, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Run a tool to completion (non-interactive) and capture its output.
///
/// Only spawn failures are errors here; callers inspect the exit status and
/// decide what a non-zero exit means for their capability.
pub(crate) async fn command_output(
    cmd: &mut Command,
    label: &str,
) -> Result<std::process::Output> {
    cmd.stdin(Stdio::null());

    cmd.output()
        .await
        .map_err(|e| CardboardError::SystemCommandFailed {
            command: label.to_string(),
            reason: e.to_string(),
        })
}

/// First non-empty line of a tool's stderr, for error payloads.
pub(crate) fn stderr_summary(output: &std::process::Output, fallback: &str) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
