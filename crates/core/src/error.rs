use crate::Uid;
use thiserror::Error;

/// Errors raised by the component model: the UID registry, object core,
/// aggregation, and event wiring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `register` was called with a UID that already has a factory.
    #[error("class already registered: {0}")]
    AlreadyRegistered(Uid),

    /// `resolve`/`create` was called with a UID that has no factory.
    #[error("class not registered: {0}")]
    NotRegistered(Uid),

    /// `create` was called with a non-null outer for a class whose factory
    /// cannot produce an aggregable object, or an aggregable class was
    /// instantiated stand-alone when the caller required aggregation.
    #[error("bad aggregation for class {0}")]
    BadAggregation(Uid),

    /// A query walked the full interface map of a class without a match.
    #[error("no such interface: {0} on class {1}")]
    NoSuchInterface(Uid, Uid),

    /// A contract violation: null sink, negative duration, time in the past,
    /// or any other caller-supplied value the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation required prior initialisation that never happened.
    #[error("not initialised: {0}")]
    NotInitialised(String),

    /// An operation required a one-time initialisation that already ran.
    #[error("already initialised: {0}")]
    AlreadyInitialised(String),

    /// A connection pool of bounded capacity rejected `connect`.
    #[error("connection limit reached: {0} slots")]
    ConnectionLimit(usize),
}

/// Result type used throughout the component model.
pub type Result<T> = std::result::Result<T, Error>;
