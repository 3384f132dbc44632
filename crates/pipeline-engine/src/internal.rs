//! Seam to the in-process command layer.

use async_trait::async_trait;
use process_executor::CancellationToken;

use crate::sink::OutputSink;

/// Outcome reported by the internal stage.
#[derive(Debug, Clone)]
pub struct InternalOutcome {
    /// Whether the internal command succeeded
    pub success: bool,
    /// Failure message when `success` is false
    pub message: Option<String>,
}

impl InternalOutcome {
    /// Successful outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Failed outcome with a message for the user.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Executes the in-process stage of a pipeline.
///
/// Implemented by the hosting application's command-dispatch layer; the
/// engine only hands it the raw command text, a sink for its output, and
/// the run's cancellation token.
#[async_trait]
pub trait InternalCommandExecutor: Send + Sync {
    /// Run `command`, writing all output to `sink`.
    async fn execute(
        &self,
        command: &str,
        sink: &mut dyn OutputSink,
        token: &CancellationToken,
    ) -> InternalOutcome;
}
