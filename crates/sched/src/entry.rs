//! Scheduled entries and the handles used to cancel them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use simnet_time::TimePoint;

use crate::error::SinkError;

/// The payload of a scheduled entry: a zero-argument callback invoked once
/// when the entry's time arrives. Its own arguments are closed over by the
/// caller of `scheduleAt`/`scheduleIn`/`scheduleNow`.
pub type Sink = Box<dyn FnOnce() -> std::result::Result<(), SinkError>>;

/// The lifecycle of a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Running,
    Cancelled,
    Done,
}

pub(crate) struct EntryInner {
    pub(crate) time: TimePoint,
    pub(crate) sequence: u64,
    pub(crate) state: Cell<EntryState>,
    pub(crate) sink: RefCell<Option<Sink>>,
}

impl EntryInner {
    pub(crate) fn new(time: TimePoint, sequence: u64, sink: Sink) -> Self {
        EntryInner {
            time,
            sequence,
            state: Cell::new(EntryState::Pending),
            sink: RefCell::new(Some(sink)),
        }
    }
}

/// A handle to a scheduled entry, returned by `scheduleNow`/`scheduleIn`/
/// `scheduleAt`. The only way to cancel a pending entry.
#[derive(Clone)]
pub struct EventHandle {
    inner: Rc<EntryInner>,
}

impl std::fmt::Debug for EventHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandle")
            .field("time", &self.inner.time)
            .field("sequence", &self.inner.sequence)
            .field("state", &self.inner.state.get())
            .finish()
    }
}

impl EventHandle {
    pub(crate) fn new(inner: Rc<EntryInner>) -> Self {
        EventHandle { inner }
    }

    /// The time this entry is (or was) scheduled to fire at.
    pub fn time(&self) -> TimePoint {
        self.inner.time
    }

    /// The entry's current state.
    pub fn state(&self) -> EntryState {
        self.inner.state.get()
    }

    /// Marks the entry cancelled. A no-op for an entry that has already
    /// run to completion. An entry already `RUNNING` is marked `CANCELLED`
    /// too, but the sink that is mid-flight is not interrupted; the run
    /// loop still drives it to `DONE` when the call returns.
    pub fn cancel(&self) {
        match self.inner.state.get() {
            EntryState::Pending | EntryState::Running => {
                self.inner.state.set(EntryState::Cancelled);
            }
            EntryState::Cancelled | EntryState::Done => {}
        }
    }
}
