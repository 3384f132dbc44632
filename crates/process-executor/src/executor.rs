//! Direct external process execution with concurrent pipe I/O.

use std::io::ErrorKind;

use async_process::ChildStdin;
use futures::future::{self, Either};
use futures::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::result::ProcessResult;

/// Executes one external process directly, with no shell in between.
///
/// The program and arguments are passed to the OS verbatim; no sanitization
/// is applied. Callers must pre-validate trust in what they hand over.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self
    }

    /// Run `program` with `args`, feeding `stdin_content` to its stdin.
    ///
    /// Stdin-writing, stdout-draining and stderr-draining run concurrently
    /// with each other and with awaiting process exit; draining one stream
    /// at a time can deadlock once the child fills the other stream's OS
    /// buffer. When `stdin_content` is `None` the child's stdin is closed
    /// immediately.
    ///
    /// Cancelling `token` force-kills the child's process tree; the result
    /// then carries the `killed` flag together with whatever output was
    /// captured up to that point.
    pub async fn execute(
        &self,
        program: &str,
        args: &[String],
        stdin_content: Option<&str>,
        token: &CancellationToken,
    ) -> ProcessResult {
        let mut command = std::process::Command::new(program);
        command.args(args);
        self.run(command, program, stdin_content, token).await
    }

    /// Shared execution path for [`execute`](Self::execute) and the shell
    /// delegator, which builds its own command line.
    pub(crate) async fn run(
        &self,
        command: std::process::Command,
        program: &str,
        stdin_content: Option<&str>,
        token: &CancellationToken,
    ) -> ProcessResult {
        let mut command = into_async(command);
        command
            .stdin(async_process::Stdio::piped())
            .stdout(async_process::Stdio::piped())
            .stderr(async_process::Stdio::piped());

        debug!(program, "spawning external process");
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ProcessResult::startup_error(format!("failed to start '{program}': {e}"));
            }
        };

        let pid = child.id();
        let stdin_pipe = child.stdin.take();
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let exited = async {
            let status = child.status();
            futures::pin_mut!(status);
            let cancelled = token.cancelled();
            futures::pin_mut!(cancelled);
            match future::select(status, cancelled).await {
                Either::Left((status, _)) => (status, false),
                Either::Right(((), status)) => {
                    debug!(pid, "cancellation requested, killing process tree");
                    if let Err(e) = kill_tree(pid) {
                        // The tree may already be gone when the signal lands;
                        // the outcome is Killed either way.
                        warn!(pid, error = %e, "kill after cancellation failed");
                    }
                    (status.await, true)
                }
            }
        };

        let ((), stdout, stderr, (status, was_killed)) = futures::join!(
            feed_stdin(stdin_pipe, stdin_content),
            drain(stdout_pipe),
            drain(stderr_pipe),
            exited,
        );

        if was_killed {
            debug!(pid, "process tree killed by cancellation");
            return ProcessResult::killed(stdout, stderr);
        }

        match status {
            Ok(status) => {
                debug!(pid, code = ?status.code(), "external process exited");
                ProcessResult::completed(status.code(), stdout, stderr)
            }
            Err(e) => {
                ProcessResult::startup_error(format!("failed to wait for '{program}': {e}"))
            }
        }
    }
}

/// Convert a configured `std` command into an async one.
///
/// On Unix the child becomes its own process-group leader, so cancellation
/// can take down the whole descendant tree with a single group signal.
fn into_async(command: std::process::Command) -> async_process::Command {
    #[cfg(unix)]
    let command = {
        use std::os::unix::process::CommandExt;
        let mut command = command;
        command.process_group(0);
        command
    };
    async_process::Command::from(command)
}

/// Write the stdin content, then close the pipe to deliver EOF.
async fn feed_stdin(pipe: Option<ChildStdin>, content: Option<&str>) {
    let Some(mut stdin) = pipe else { return };
    let Some(content) = content else {
        // Nothing to write: close immediately so filters waiting on EOF run.
        drop(stdin);
        return;
    };

    let wrote = async {
        stdin.write_all(content.as_bytes()).await?;
        stdin.flush().await?;
        std::io::Result::Ok(())
    }
    .await;

    match wrote {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            // Filters like `head -2` close their input once they have read
            // what they need; expected, not an error.
            debug!("child closed stdin before the write finished");
        }
        Err(e) => warn!(error = %e, "writing to child stdin failed"),
    }
}

/// Read an output stream to the end, capturing whatever arrives before the
/// pipe closes.
async fn drain<R>(pipe: Option<R>) -> String
where
    R: futures::io::AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return String::new();
    };
    let mut buf = Vec::new();
    if let Err(e) = pipe.read_to_end(&mut buf).await {
        debug!(error = %e, "output stream closed with error");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(unix)]
fn kill_tree(pid: u32) -> Result<()> {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let pid = Pid::from_raw(pid as i32);
    // One group signal reaches every descendant, including the stages a
    // delegated shell spawned.
    signal::killpg(pid, Signal::SIGKILL)
        .or_else(|_| signal::kill(pid, Signal::SIGKILL))
        .map_err(|e| crate::error::Error::signal_failed(9, e.to_string()))?;
    Ok(())
}

#[cfg(windows)]
fn kill_tree(pid: u32) -> Result<()> {
    // taskkill /T fans the kill out over the descendant tree.
    std::process::Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .output()?;
    Ok(())
}
