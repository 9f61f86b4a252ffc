//! Shell command execution with logged output.

use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{error, info};

use crate::error::{Error, Result};

/// Prefix marking logger lines that came from a child command.
const OUTPUT_TAG: &str = "[cmd]";

/// Captured result of a shell command: exit status plus the combined
/// stdout/stderr stream, trailing-trimmed and newline-joined.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShellOutput {
    pub exit_code: i32,
    pub output: String,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a shell command and capture its output.
///
/// The command string is handed to `sh -c`, so pipes, redirection, and
/// globbing all work. Stdout and stderr are merged into a single stream and
/// read line by line until EOF; with `echo_output` each line is also logged
/// at INFO under the `[cmd]` prefix. The call blocks until the child has
/// exited and its output is fully drained.
///
/// A non-zero exit is not an error by itself — the caller gets the code in
/// the returned [`ShellOutput`] and decides. Supplying a non-empty
/// `fail_msg` opts into fail-fast: the message is logged at ERROR and a
/// `command.failed` error is returned for the top level to map to a process
/// exit.
pub fn run_shell(command: &str, echo_output: bool, fail_msg: Option<&str>) -> Result<ShellOutput> {
    // One pipe shared by both output descriptors keeps the child's own
    // write ordering intact.
    let (reader, writer) = io::pipe().map_err(|e| {
        Error::internal_io(
            format!("Failed to create output pipe: {}", e),
            Some("run shell".to_string()),
        )
    })?;
    let writer_clone = writer.try_clone().map_err(|e| {
        Error::internal_io(
            format!("Failed to clone output pipe: {}", e),
            Some("run shell".to_string()),
        )
    })?;

    let mut child = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command])
            .stdin(Stdio::null())
            .stdout(writer_clone)
            .stderr(writer);
        cmd.spawn().map_err(|e| {
            Error::internal_io(
                format!("Failed to run '{}': {}", command, e),
                Some("run shell".to_string()),
            )
        })?
        // The builder drops here, closing the parent's copies of the write
        // end; the reader would never see EOF otherwise.
    };

    let mut lines: Vec<String> = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line.map_err(|e| {
            Error::internal_io(
                format!("Failed to read output of '{}': {}", command, e),
                Some("run shell".to_string()),
            )
        })?;
        let line = line.trim_end().to_string();
        if echo_output {
            info!("{} {}", OUTPUT_TAG, line);
        }
        lines.push(line);
    }

    let status = child.wait().map_err(|e| {
        Error::internal_io(
            format!("Failed to wait for '{}': {}", command, e),
            Some("run shell".to_string()),
        )
    })?;
    let exit_code = status.code().unwrap_or(-1);
    let output = lines.join("\n");

    if exit_code != 0 {
        if let Some(msg) = fail_msg.filter(|m| !m.is_empty()) {
            error!("{}", msg);
            return Err(Error::command_failed(command, exit_code, output, msg));
        }
    }

    Ok(ShellOutput { exit_code, output })
}
