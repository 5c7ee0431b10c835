//! External command execution as a logged operation.

use std::fmt;
use std::process::{Command, Output, Stdio};

use super::Logger;
use crate::error::CommandError;

impl Logger {
    /// Run `cmd` to completion as a logged operation described by `args`.
    ///
    /// stdin is closed and stdout/stderr are captured in memory; any stdio
    /// the caller configured on `cmd` is replaced. On success the captured
    /// [`Output`] is returned. On failure the error embeds both captured
    /// streams, so the `[failed]` line carries the process's own diagnostics.
    pub fn log_cmd(
        &mut self,
        cmd: &mut Command,
        args: fmt::Arguments<'_>,
    ) -> Result<Output, CommandError> {
        self.log_op(|logger| run_captured(logger, cmd), args)
    }
}

/// The executable `cmd` will run, looked up on `PATH`; as given if lookup fails.
fn resolved_program(cmd: &Command) -> String {
    match which::which(cmd.get_program()) {
        Ok(path) => path.display().to_string(),
        Err(_) => cmd.get_program().to_string_lossy().into_owned(),
    }
}

fn run_captured(logger: &Logger, cmd: &mut Command) -> Result<Output, CommandError> {
    let program = resolved_program(cmd);
    let argv: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let _ = if argv.is_empty() {
        logger.debug(format_args!("executing: {}", program))
    } else {
        logger.debug(format_args!("executing: {} [{}]", program, argv.join(" ")))
    };

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| CommandError::Io {
            program,
            source,
            stdout: String::new(),
            stderr: String::new(),
        })?;

    if output.status.success() {
        Ok(output)
    } else {
        Err(CommandError::Exit {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
