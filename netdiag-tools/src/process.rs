//! Child-process execution with bounded, captured output.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::outcome::{ExecOutcome, FailureKind};

/// Run an argument vector as a child process and capture its output.
///
/// The first element is the executable, the rest are literal arguments;
/// nothing is passed through a shell. Standard output and standard error
/// are captured and merged into one text stream. A non-zero exit still
/// returns the captured text, because the diagnostic tools this layer
/// drives report their most useful information that way. On timeout the
/// child is killed (`kill_on_drop`) and the abandonment is reported in
/// the outcome. Never retries.
pub async fn run(argv: &[String], deadline: Duration) -> ExecOutcome {
    let (program, args) = match argv.split_first() {
        Some(parts) => parts,
        None => {
            return ExecOutcome::failure(FailureKind::NonZeroExit, "empty argument vector");
        }
    };

    debug!(%program, args = ?args, "spawning diagnostic command");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(deadline, cmd.output()).await {
        Err(_) => {
            warn!(%program, timeout_ms = deadline.as_millis() as u64, "command timed out");
            ExecOutcome::failure(
                FailureKind::NonZeroExit,
                format!(
                    "{} timed out after {}ms and was terminated",
                    program,
                    deadline.as_millis()
                ),
            )
        }
        Ok(Err(err)) if err.kind() == io::ErrorKind::NotFound => ExecOutcome::failure(
            FailureKind::BinaryNotFound,
            format!(
                "Error: {program} not found. Make sure it is installed and added to your system PATH."
            ),
        ),
        Ok(Err(err)) => ExecOutcome::failure(
            FailureKind::NonZeroExit,
            format!("failed to execute {program}: {err}"),
        ),
        Ok(Ok(output)) => {
            let text = merge_streams(&output.stdout, &output.stderr);
            if output.status.success() {
                ExecOutcome::Success(text)
            } else if text.is_empty() {
                ExecOutcome::failure(
                    FailureKind::NonZeroExit,
                    format!("{program} exited with {}", output.status),
                )
            } else {
                ExecOutcome::failure(FailureKind::NonZeroExit, text)
            }
        }
    }
}

fn merge_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text
}
