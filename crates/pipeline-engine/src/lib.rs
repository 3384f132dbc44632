//! Orchestration of mixed internal/external pipelines.
//!
//! A pipeline is exactly one in-process ("internal") stage followed by one or
//! more OS-process ("external") stages. The engine runs the internal stage
//! into a capturing sink, feeds the capture to the external stages as stdin,
//! and maps the raw process outcome into a single caller-facing result.

#![warn(missing_docs)]

pub mod executor;
pub mod internal;
pub mod pipeline;
pub mod result;
pub mod sink;

pub use executor::PipelineExecutor;
pub use internal::{InternalCommandExecutor, InternalOutcome};
pub use pipeline::{ParsedPipeline, PipelineSegment, SegmentKind};
pub use process_executor::CancellationToken;
pub use result::{FailureKind, PipelineExecutionResult, PipelineStatus};
pub use sink::{CaptureSink, OutputSink};
