//! Component model, object core, and event wiring for the simulation
//! runtime.
//!
//! This crate has no notion of simulated time or scheduling; those live in
//! `simnet-time` and `simnet-sched`, built on top of the object model
//! defined here. What this crate does own:
//!
//! - [`object`]: the interface map, reference-counted object core, and
//!   aggregation/tear-off machinery every component is built from.
//! - [`uid`]: the string-keyed identifiers used for both class UIDs and
//!   interface UIDs.
//! - [`ptr`]: the explicit retain/release handle components are passed
//!   around by, plus [`ptr::StaticPtr`] for the Static lifetime variant.
//! - [`registry`]: the process-wide class-UID-to-factory table.
//! - [`event`]: connection pools and fan-out for event-sink interfaces.
//! - [`logging`]: the [`Logger`](logging::Logger) seam the rest of the
//!   workspace logs through.
//! - [`random`]: the [`RandomSource`](random::RandomSource) seam models draw
//!   randomness through.
//! - [`probe`]: named, runtime-addressable instrumentation points.

pub mod error;
pub mod event;
pub mod logging;
pub mod object;
pub mod probe;
pub mod ptr;
pub mod random;
pub mod registry;
pub mod uid;

pub use error::{Error, Result};
pub use event::{ConnectionPool, Cookie, EventSource};
pub use logging::{AttributeValue, Level, LogRecord, Logger, NullLogger, TracingLogger};
pub use object::{Component, InterfaceEntry, ObjectCore, Root};
pub use probe::{Probe, ProbeRegistry};
pub use ptr::{leak_static, Ptr, StaticPtr};
pub use random::{NullRandomSource, RandomSource};
pub use registry::{create, register, resolve, unregister, Factory, Registry};
pub use uid::{Uid, INNER_ROOT_UID, ROOT_UID};
