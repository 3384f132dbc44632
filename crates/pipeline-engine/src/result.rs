//! Caller-facing pipeline results.

use serde::{Deserialize, Serialize};

/// Why a pipeline failed before or while launching external processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The pipeline was malformed; nothing ran
    Validation,
    /// The internal stage reported failure; nothing external ran
    Internal,
    /// An external process could not be launched
    Startup,
}

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStatus {
    /// The external stage completed; its exit code is reported as data
    Succeeded,
    /// The run failed before producing an external result
    Failed(FailureKind),
    /// Cancellation aborted the run; output may be partial
    Cancelled,
}

/// Unified result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineExecutionResult {
    /// Terminal state of the run
    pub status: PipelineStatus,
    /// Captured standard output (possibly partial when cancelled)
    pub output: String,
    /// Captured standard error (possibly partial when cancelled)
    pub error_output: String,
    /// Top-level error message for failed runs
    pub error: Option<String>,
    /// Exit code of the external stage, when it completed
    pub exit_code: Option<i32>,
}

impl PipelineExecutionResult {
    /// Result for a completed external stage; a nonzero exit code is data,
    /// not failure.
    pub fn succeeded(output: String, error_output: String, exit_code: Option<i32>) -> Self {
        Self {
            status: PipelineStatus::Succeeded,
            output,
            error_output,
            error: None,
            exit_code,
        }
    }

    /// Result for a run that failed before producing an external result.
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: PipelineStatus::Failed(kind),
            output: String::new(),
            error_output: String::new(),
            error: Some(message.into()),
            exit_code: None,
        }
    }

    /// Result for a cancelled run, keeping whatever output exists.
    pub fn cancelled(output: String, error_output: String) -> Self {
        Self {
            status: PipelineStatus::Cancelled,
            output,
            error_output,
            error: None,
            exit_code: None,
        }
    }

    /// Whether the run succeeded.
    pub fn success(&self) -> bool {
        self.status == PipelineStatus::Succeeded
    }

    /// Whether any stderr content was captured.
    pub fn has_error_output(&self) -> bool {
        !self.error_output.is_empty()
    }

    /// Whether the external stage completed with a nonzero (or missing)
    /// exit code. Callers surface this as a warning, not an error.
    pub fn has_nonzero_exit(&self) -> bool {
        self.status == PipelineStatus::Succeeded && self.exit_code != Some(0)
    }
}
