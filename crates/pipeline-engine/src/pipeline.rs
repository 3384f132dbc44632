//! Parsed pipeline input types.
//!
//! Values of these types are produced by the syntactic pipeline parser,
//! which lives outside this crate; the engine only consumes them.

use serde::{Deserialize, Serialize};

/// Which side of the process boundary a stage runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Implemented in-process by the hosting application
    Internal,
    /// An OS-level executable invoked as a child process
    External,
}

/// One stage of a parsed pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSegment {
    /// Raw command text as typed, unescaped
    pub command: String,
    /// Zero-based position in the pipeline
    pub position: usize,
    /// Whether this is the first segment
    pub is_first: bool,
    /// Whether this is the last segment
    pub is_last: bool,
    /// Internal or external stage
    pub kind: SegmentKind,
}

/// A parsed pipeline: one internal stage followed by external stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedPipeline {
    /// Ordered stages; the internal stage comes first
    pub segments: Vec<PipelineSegment>,
    /// Whether the parser accepted the input
    pub is_valid: bool,
    /// Parser error text when `is_valid` is false
    pub error: Option<String>,
}

impl ParsedPipeline {
    /// Build a valid pipeline from an internal command followed by external
    /// command texts, filling in positions and first/last flags.
    pub fn from_stage_texts(
        internal: impl Into<String>,
        externals: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut commands: Vec<(String, SegmentKind)> = vec![(internal.into(), SegmentKind::Internal)];
        commands.extend(
            externals
                .into_iter()
                .map(|c| (c.into(), SegmentKind::External)),
        );

        let total = commands.len();
        let segments = commands
            .into_iter()
            .enumerate()
            .map(|(position, (command, kind))| PipelineSegment {
                command,
                position,
                is_first: position == 0,
                is_last: position + 1 == total,
                kind,
            })
            .collect();

        Self {
            segments,
            is_valid: true,
            error: None,
        }
    }

    /// Build a pipeline the parser rejected.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            is_valid: false,
            error: Some(error.into()),
        }
    }

    /// The external segments, in order.
    pub fn external_segments(&self) -> impl Iterator<Item = &PipelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::External)
    }
}
