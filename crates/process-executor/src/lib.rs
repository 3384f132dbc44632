//! Direct execution of external OS processes with deadlock-free pipe I/O.
//!
//! This crate provides the process-facing half of the piping engine: spawning
//! a single executable directly, streaming its stdin/stdout/stderr
//! concurrently, force-killing its process tree on cancellation, and handing
//! multi-stage pipe expressions to the platform's default shell.

#![warn(missing_docs)]

pub mod cancel;
pub mod error;
pub mod escape;
pub mod executor;
pub mod platform;
pub mod result;
pub mod shell;

pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use executor::ProcessExecutor;
pub use platform::{DefaultShell, PathLocator, ShellLocator};
pub use result::{ProcessOutcome, ProcessResult};
pub use shell::ShellDelegator;
