//! Subprocess execution helper (exec-style, no shell).
//!
//! Spawns child processes directly (no intermediate shell). Output is either
//! captured into bounded buffers or passed straight through to the terminal.
//! Children are waited on without a deadline.

use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Upper bound on bytes read from each of stdout / stderr (10 MiB).
const MAX_OUTPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Captured output from a subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the OS did not report an exit code (e.g. signal
    /// termination on Unix).
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `program` with `args` in `cwd`, capturing stdout and stderr.
///
/// Stdout and stderr are each capped at 10 MiB.
pub fn run_command<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: &Path,
) -> std::io::Result<CommandResult> {
    debug!(program, args = ?args_for_log(args), cwd = %cwd.display(), "running command");

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Read both pipes on their own threads so neither can fill up and
    // block the child. Both were set to piped above.
    let child_stdout = child.stdout.take().expect("stdout was piped");
    let child_stderr = child.stderr.take().expect("stderr was piped");

    let stdout_handle = std::thread::spawn(move || read_bounded(child_stdout));
    let stderr_handle = std::thread::spawn(move || read_bounded(child_stderr));

    let status = child.wait()?;

    let stdout = stdout_handle
        .join()
        .map_err(|e| std::io::Error::other(format!("stdout reader thread panicked: {e:?}")))??;
    let stderr = stderr_handle
        .join()
        .map_err(|e| std::io::Error::other(format!("stderr reader thread panicked: {e:?}")))??;

    Ok(CommandResult {
        stdout,
        stderr,
        exit_code: status.code(),
    })
}

/// Run `program` with the terminal attached, so its output is shown to the
/// user as it happens. Returns the exit code.
pub fn run_attached<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: &Path,
) -> std::io::Result<Option<i32>> {
    debug!(program, args = ?args_for_log(args), cwd = %cwd.display(), "running attached command");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    Ok(status.code())
}

fn args_for_log<S: AsRef<OsStr>>(args: &[S]) -> Vec<String> {
    args.iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect()
}

/// Read up to [`MAX_OUTPUT_BYTES`] from `reader`, returning the result as a
/// (possibly lossy) UTF-8 string.
fn read_bounded(reader: impl Read) -> std::io::Result<String> {
    let mut buf = Vec::new();
    reader.take(MAX_OUTPUT_BYTES).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
