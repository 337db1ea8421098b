//! The event scheduler: an ordered queue plus the virtual clock it drives.
//!
//! Methods take `&self`, not `&mut self` (the queue and clock live behind
//! `RefCell`/`Cell` the same way `simnet_core::EventSource` wraps its
//! connection pool), so a sink invoked from inside `run`/`runFor`/`runUntil`
//! can freely hold an `Rc<EventScheduler>` and call `schedule_in`/`cancel`
//! back into the same scheduler without a borrow conflict: no borrow of
//! `queue` or `clock` is ever held across a sink invocation.

use std::cell::{Cell, RefCell};

use simnet_time::{Duration, TimePoint};

use crate::entry::{EntryState, EventHandle, Sink};
use crate::error::{Error, Result};
use crate::queue::OrderedQueue;

pub struct EventScheduler {
    queue: RefCell<OrderedQueue>,
    clock: Cell<TimePoint>,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventScheduler {
    pub fn new() -> Self {
        EventScheduler {
            queue: RefCell::new(OrderedQueue::new()),
            clock: Cell::new(TimePoint::ZERO),
        }
    }

    /// Creates a scheduler whose queue pre-allocates room for `hint`
    /// entries, avoiding reallocation during the first wave of scheduling.
    pub fn with_capacity_hint(hint: usize) -> Self {
        EventScheduler {
            queue: RefCell::new(OrderedQueue::with_capacity_hint(hint)),
            clock: Cell::new(TimePoint::ZERO),
        }
    }

    /// The scheduler's virtual clock. Never decreases.
    pub fn now(&self) -> TimePoint {
        self.clock.get()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Equivalent to `schedule_at(self.now(), sink)`.
    pub fn schedule_now(&self, sink: Sink) -> EventHandle {
        let inner = self.queue.borrow_mut().push(self.now(), sink);
        EventHandle::new(inner)
    }

    /// Equivalent to `schedule_at(self.now() + dt, sink)`. Fails if `dt` is
    /// negative.
    pub fn schedule_in(&self, dt: Duration, sink: Sink) -> Result<EventHandle> {
        if !dt.is_non_negative() {
            return Err(Error::InvalidArgument(format!(
                "scheduleIn duration {dt} is negative"
            )));
        }
        self.schedule_at(self.now() + dt, sink)
    }

    /// Schedules `sink` to run at `t`. Fails with `InvalidArgument` if `t`
    /// is before `now()`.
    pub fn schedule_at(&self, t: TimePoint, sink: Sink) -> Result<EventHandle> {
        if t < self.now() {
            return Err(Error::InvalidArgument(format!(
                "scheduled time {t} is before now ({})",
                self.now()
            )));
        }
        let inner = self.queue.borrow_mut().push(t, sink);
        Ok(EventHandle::new(inner))
    }

    /// Marks `handle`'s entry cancelled. Silently does nothing for an
    /// unknown or already-completed entry.
    pub fn cancel(&self, handle: &EventHandle) {
        handle.cancel();
    }

    /// Runs until the queue is empty or the clock would need to pass
    /// `now() + dt`. Fails if `dt` is negative.
    pub fn run_for(&self, dt: Duration) -> Result<()> {
        if !dt.is_non_negative() {
            return Err(Error::InvalidArgument(format!(
                "runFor duration {dt} is negative"
            )));
        }
        let deadline = self.now() + dt;
        self.run_while(deadline, || true)
    }

    /// Runs until the queue is empty or the clock would need to pass `t`.
    /// Fails if `t` is before `now()`.
    pub fn run_until(&self, t: TimePoint) -> Result<()> {
        if t < self.now() {
            return Err(Error::InvalidArgument(format!(
                "runUntil time {t} is before now ({})",
                self.now()
            )));
        }
        self.run_while(t, || true)
    }

    /// Drives the run loop up to `deadline`, rechecking `should_continue` at
    /// the top of every iteration (the hook `Simulator::pause` uses). When
    /// the loop stops because the queue drained or the next entry exceeds
    /// `deadline`, the clock is advanced to `deadline`; when it stops
    /// because `should_continue` returned `false`, the clock is left where
    /// the last dispatched entry put it.
    pub(crate) fn run_while(&self, deadline: TimePoint, should_continue: impl Fn() -> bool) -> Result<()> {
        while should_continue() {
            if !self.step(deadline)? {
                self.clock.set(deadline);
                break;
            }
        }
        Ok(())
    }

    /// Discards any cancelled entries at the head of the queue, then runs
    /// at most one ready entry. Returns `Ok(true)` if an entry ran,
    /// `Ok(false)` if the queue is empty or the earliest entry's time
    /// exceeds `deadline`.
    fn step(&self, deadline: TimePoint) -> Result<bool> {
        loop {
            let next = self.queue.borrow().peek();
            let entry = match next {
                None => return Ok(false),
                Some(entry) => entry,
            };
            if entry.state.get() == EntryState::Cancelled {
                self.queue.borrow_mut().pop();
                continue;
            }
            if entry.time > deadline {
                return Ok(false);
            }
            let popped = self.queue.borrow_mut().pop();
            debug_assert!(popped.is_some(), "peeked entry vanished before pop");

            entry.state.set(EntryState::Running);
            self.clock.set(entry.time);
            tracing::trace!(time = entry.time.as_ticks(), sequence = entry.sequence, "dispatching scheduled entry");
            let sink = entry.sink.borrow_mut().take();
            let result = match sink {
                Some(sink) => sink(),
                None => Ok(()),
            };
            entry.state.set(EntryState::Done);
            if let Err(ref err) = result {
                tracing::warn!(error = %err, "sink error escaped a scheduled entry");
            }
            result?;
            return Ok(true);
        }
    }
}
