//! Delegation of multi-stage pipe expressions to the platform shell.

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::escape;
use crate::executor::ProcessExecutor;
use crate::platform::{self, PathLocator, ShellLocator};
use crate::result::ProcessResult;

/// Runs a pipe expression of two or more stages via the default shell.
///
/// Piping between the stages is entirely the shell's job; this type never
/// builds its own inter-process plumbing. A single command has no pipes and
/// belongs on the direct [`ProcessExecutor`] path instead.
pub struct ShellDelegator<L: ShellLocator = PathLocator> {
    executor: ProcessExecutor,
    locator: L,
}

impl ShellDelegator<PathLocator> {
    /// Delegator resolving the shell from the live `PATH`.
    pub fn new() -> Self {
        Self::with_locator(PathLocator)
    }
}

impl Default for ShellDelegator<PathLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ShellLocator> ShellDelegator<L> {
    /// Delegator with an injected shell locator.
    pub fn with_locator(locator: L) -> Self {
        Self {
            executor: ProcessExecutor::new(),
            locator,
        }
    }

    /// Execute the raw, unescaped command texts as one shell pipeline.
    ///
    /// Precondition failures come back as startup-error results rather than
    /// panics: an empty list has nothing to run, and a single command must
    /// use the direct process path.
    pub async fn execute(
        &self,
        commands: &[String],
        stdin_content: Option<&str>,
        token: &CancellationToken,
    ) -> ProcessResult {
        if commands.is_empty() {
            return ProcessResult::startup_error("no commands provided for shell delegation");
        }
        if commands.len() == 1 {
            return ProcessResult::startup_error(
                "a single command does not need shell delegation; execute it directly",
            );
        }

        let pipeline = escape::build_pipeline_command(commands);
        let shell = platform::default_shell(&self.locator);
        let program = shell.program.to_string_lossy().into_owned();
        debug!(shell = %program, %pipeline, "delegating pipeline to shell");

        let command = build_shell_command(&shell, &pipeline);
        self.executor
            .run(command, &program, stdin_content, token)
            .await
    }
}

/// Build `<shell> <flag> <pipeline>` for the current platform.
///
/// On Unix each argv element reaches `sh -c` verbatim through `execve`, so
/// the joined expression travels as a single raw argument. On Windows the
/// child receives one flat command line that PowerShell re-parses, so the
/// expression is escaped as a whole and attached unquoted; escaping per
/// stage would stop the shell from seeing the pipe operators.
#[cfg(not(windows))]
fn build_shell_command(shell: &platform::DefaultShell, pipeline: &str) -> std::process::Command {
    let mut command = std::process::Command::new(&shell.program);
    command.arg(shell.flag).arg(pipeline);
    command
}

#[cfg(windows)]
fn build_shell_command(shell: &platform::DefaultShell, pipeline: &str) -> std::process::Command {
    use std::os::windows::process::CommandExt;

    let escaped = escape::escape_powershell_argument(pipeline);
    let mut command = std::process::Command::new(&shell.program);
    command.arg(shell.flag).raw_arg(escaped);
    command
}
