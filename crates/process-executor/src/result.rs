//! Raw process outcomes as seen by the caller.

use serde::{Deserialize, Serialize};

/// Everything captured from one external process run.
///
/// The three possible outcomes are mutually exclusive; [`ProcessResult::outcome`]
/// exposes them as a tagged union. Whatever stdout/stderr was captured before
/// the process ended is always present, including after a forced kill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Exit code of the process. Meaningful only when `killed` is false and
    /// `startup_error` is absent; `None` means the process was terminated by
    /// a signal outside our control.
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Whether cancellation force-killed the process tree
    pub killed: bool,
    /// Message describing a failure to launch the process at all
    pub startup_error: Option<String>,
}

/// Three-way outcome taxonomy for a process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome<'a> {
    /// The process could not be launched
    StartupError(&'a str),
    /// Cancellation force-killed the process tree
    Killed,
    /// The process ran to completion with the given exit code; `None` means
    /// it was terminated by an unrelated signal
    Completed(Option<i32>),
}

impl ProcessResult {
    /// Result for a process that ran to completion.
    pub fn completed(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            killed: false,
            startup_error: None,
        }
    }

    /// Result for a process force-killed by cancellation, keeping whatever
    /// output was captured before the kill.
    pub fn killed(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            killed: true,
            startup_error: None,
        }
    }

    /// Result for a process that never launched.
    pub fn startup_error(message: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            killed: false,
            startup_error: Some(message.into()),
        }
    }

    /// The mutually exclusive outcome of this run.
    pub fn outcome(&self) -> ProcessOutcome<'_> {
        if let Some(message) = &self.startup_error {
            ProcessOutcome::StartupError(message)
        } else if self.killed {
            ProcessOutcome::Killed
        } else {
            ProcessOutcome::Completed(self.exit_code)
        }
    }

    /// Returns true if the process completed with exit code 0.
    pub fn success(&self) -> bool {
        matches!(self.outcome(), ProcessOutcome::Completed(Some(0)))
    }
}
