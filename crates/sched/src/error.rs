//! Error type for the scheduler and simulator facade.

use thiserror::Error;

/// The error type a sink closure may fail with. Boxed so the scheduler
/// doesn't need to know the sink's concrete error type.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// A negative `scheduleIn` duration, or a `scheduleAt`/`runUntil` time
    /// before `now()`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An error that escaped a sink during `run`/`runFor`/`runUntil`.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, Error>;
