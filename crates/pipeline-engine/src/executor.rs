//! Pipeline orchestration: internal capture, external dispatch, result mapping.

use process_executor::{
    CancellationToken, PathLocator, ProcessExecutor, ProcessOutcome, ShellDelegator, ShellLocator,
};
use tracing::{debug, info};

use crate::internal::InternalCommandExecutor;
use crate::pipeline::{ParsedPipeline, SegmentKind};
use crate::result::{FailureKind, PipelineExecutionResult};
use crate::sink::CaptureSink;

/// How the external stages will run, selected once from the segment count.
enum ExternalDispatch {
    /// One external stage, spawned directly without a shell
    Direct { program: String, args: Vec<String> },
    /// Two or more stages, handed to the default shell as one pipe expression
    ShellChain { commands: Vec<String> },
}

/// Runs a parsed pipeline end to end.
///
/// The internal stage resolves fully before any external process starts;
/// its captured output becomes the external stage's stdin.
pub struct PipelineExecutor<L: ShellLocator = PathLocator> {
    process: ProcessExecutor,
    delegator: ShellDelegator<L>,
}

impl PipelineExecutor<PathLocator> {
    /// Executor resolving the delegation shell from the live `PATH`.
    pub fn new() -> Self {
        Self::with_locator(PathLocator)
    }
}

impl Default for PipelineExecutor<PathLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ShellLocator> PipelineExecutor<L> {
    /// Executor with an injected shell locator.
    pub fn with_locator(locator: L) -> Self {
        Self {
            process: ProcessExecutor::new(),
            delegator: ShellDelegator::with_locator(locator),
        }
    }

    /// Execute `pipeline`, running its internal stage through `internal`.
    ///
    /// Validation and internal-stage failures return before any OS process
    /// is spawned. Cancellation at any point yields a cancelled result
    /// carrying whatever output was already captured.
    pub async fn execute(
        &self,
        pipeline: &ParsedPipeline,
        internal: &dyn InternalCommandExecutor,
        token: &CancellationToken,
    ) -> PipelineExecutionResult {
        let (internal_command, dispatch) = match validate(pipeline) {
            Ok(plan) => plan,
            Err(message) => {
                debug!(%message, "rejecting pipeline before execution");
                return PipelineExecutionResult::failed(FailureKind::Validation, message);
            }
        };

        info!(
            stages = pipeline.segments.len(),
            "executing pipeline with internal stage"
        );

        let mut sink = CaptureSink::new();
        let outcome = internal.execute(internal_command, &mut sink, token).await;
        let captured = sink.into_captured();

        if token.is_cancelled() {
            return PipelineExecutionResult::cancelled(captured, String::new());
        }
        if !outcome.success {
            let message = outcome
                .message
                .unwrap_or_else(|| "internal command failed".to_string());
            return PipelineExecutionResult::failed(FailureKind::Internal, message);
        }

        let result = match &dispatch {
            ExternalDispatch::Direct { program, args } => {
                debug!(%program, "dispatching to direct process execution");
                self.process
                    .execute(program, args, Some(&captured), token)
                    .await
            }
            ExternalDispatch::ShellChain { commands } => {
                debug!(stages = commands.len(), "dispatching to shell delegation");
                self.delegator
                    .execute(commands, Some(&captured), token)
                    .await
            }
        };

        match result.outcome() {
            ProcessOutcome::StartupError(message) => {
                let hint = match &dispatch {
                    ExternalDispatch::Direct { program, .. } => format!(
                        "{message}. Check that '{program}' is installed and available on your PATH."
                    ),
                    ExternalDispatch::ShellChain { .. } => format!(
                        "{message}. Check that every pipeline stage is installed and available on your PATH."
                    ),
                };
                PipelineExecutionResult::failed(FailureKind::Startup, hint)
            }
            ProcessOutcome::Killed => PipelineExecutionResult::cancelled(result.stdout, result.stderr),
            ProcessOutcome::Completed(exit_code) => {
                PipelineExecutionResult::succeeded(result.stdout, result.stderr, exit_code)
            }
        }
    }
}

/// Check pipeline shape and plan the external dispatch.
///
/// Everything here happens before any process is spawned.
fn validate(pipeline: &ParsedPipeline) -> Result<(&str, ExternalDispatch), String> {
    if !pipeline.is_valid {
        return Err(pipeline
            .error
            .clone()
            .unwrap_or_else(|| "invalid pipeline".to_string()));
    }

    let Some(first) = pipeline.segments.first() else {
        return Err("pipeline is empty".to_string());
    };
    if first.kind != SegmentKind::Internal {
        return Err("pipeline must start with an internal command".to_string());
    }
    if pipeline.segments[1..]
        .iter()
        .any(|s| s.kind == SegmentKind::Internal)
    {
        return Err("pipeline may contain only one internal command".to_string());
    }

    let externals: Vec<&str> = pipeline
        .external_segments()
        .map(|s| s.command.as_str())
        .collect();
    if externals.is_empty() {
        return Err("pipeline has no external command".to_string());
    }
    for (index, command) in externals.iter().enumerate() {
        if command.trim().is_empty() {
            return Err(format!("empty external command at stage {}", index + 1));
        }
    }

    let dispatch = if let [only] = externals.as_slice() {
        // Naive whitespace tokenization; the external command is trusted
        // input typed by the user, not a shell expression.
        let mut tokens = only.split_whitespace();
        let Some(program) = tokens.next() else {
            return Err("empty external command at stage 1".to_string());
        };
        ExternalDispatch::Direct {
            program: program.to_string(),
            args: tokens.map(str::to_string).collect(),
        }
    } else {
        ExternalDispatch::ShellChain {
            commands: externals.iter().map(|c| c.to_string()).collect(),
        }
    };

    Ok((first.command.as_str(), dispatch))
}
