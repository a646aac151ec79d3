//! One-shot subprocess execution with captured output.
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, trace};

use reap_core::ControlPlaneError;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub(crate) struct CommandOutput {
    pub(crate) success: bool,
    pub(crate) code: Option<i32>,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
}

impl CommandOutput {
    /// Stdout followed by stderr, lossily decoded.
    pub(crate) fn combined(&self) -> String {
        let mut out = String::from_utf8_lossy(&self.stdout).into_owned();
        out.push_str(&String::from_utf8_lossy(&self.stderr));
        out
    }

    /// Stderr, lossily decoded and cut to `max_len` bytes.
    pub(crate) fn stderr_excerpt(&self, max_len: usize) -> String {
        truncate(String::from_utf8_lossy(&self.stderr).trim(), max_len)
    }
}

/// Run `program` with `args` to completion.
///
/// Stdin is closed, stdout and stderr are captured. The child is killed if the
/// returned future is dropped before it exits, so callers may wrap this in a timeout.
pub(crate) async fn run(program: &str, args: &[String]) -> Result<CommandOutput, ControlPlaneError> {
    trace!(command = %program, args = ?args, "spawning subprocess");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = cmd
        .output()
        .await
        .map_err(|e| ControlPlaneError::Io(format!("failed to run '{program}': {e}")))?;

    debug!(
        command = %program,
        code = ?output.status.code(),
        stdout_len = output.stdout.len(),
        stderr_len = output.stderr.len(),
        "subprocess exited"
    );

    Ok(CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Cut `s` to at most `max_len` bytes on a char boundary, marking the cut.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
