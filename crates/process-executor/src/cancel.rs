//! Cancellation primitives.
//!
//! The token is runtime independent and composes with whichever executor is
//! driving these futures; callers clone it and trigger it from wherever the
//! abort signal originates (Ctrl-C handler, REPL command, test timer).

pub use tokio_util::sync::CancellationToken;
