//! Ordered event queue, virtual-time run loop, and simulator facade.
//!
//! An [`EventScheduler`] holds an ordered multiset of [`EventHandle`]-backed
//! entries keyed by `(time, insertion sequence)` and drives a virtual
//! [`simnet_time::TimePoint`] forward as it dispatches them. [`Simulator`]
//! layers `run`/`runFor`/`runUntil`/`pause`/`resume` and a lifecycle event
//! interface over one.

mod entry;
mod error;
mod queue;
mod scheduler;
mod simulator;

pub use entry::{EntryState, EventHandle, Sink};
pub use error::{Error, Result, SinkError};
pub use scheduler::EventScheduler;
pub use simulator::{LifecycleEvent, Simulator};
