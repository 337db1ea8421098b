use thiserror::Error;

/// Errors raised by buffer storage, views, and iterators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A growth or reallocation could not obtain the requested capacity.
    #[error("out of memory: requested {0} bytes")]
    OutOfMemory(usize),

    /// A caller-supplied offset or length was out of bounds or otherwise
    /// nonsensical (e.g. a fragment range past the end of its parent view).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An iterator attempted to write into the zero-compressed region at
    /// the given logical offset. Checked-mode counterpart to the
    /// `debug_assert!` that catches the same violation in debug builds.
    #[error("attempted to write into the zero-compressed region at offset {0}")]
    CompressedRegionWrite(usize),
}

/// Result type used throughout the buffer crate.
pub type Result<T> = std::result::Result<T, Error>;
