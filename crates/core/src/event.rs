//! Event wiring: connection pools and fan-out.
//!
//! An event-source object owns an [`EventSource<S>`], a cookie-keyed pool of
//! sinks of type `S`. `fire` calls every connected sink in ascending cookie
//! order and returns the last sink's result (or a default value if the pool
//! is empty). Because the pool snapshots its sinks (cheap `Rc` clones)
//! before calling out, a sink is free to `connect`/`disconnect` (even
//! disconnect itself) without deadlocking or corrupting the fan-out in
//! progress; such changes are only visible on the *next* `fire`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};

/// The stable identity of a connection: `slot_index + 1`. Never zero;
/// `disconnect` treats `0` (and any other cookie it does not recognise) as
/// a silent no-op.
pub type Cookie = usize;

/// An ordered, cookie-addressed collection of sinks.
pub struct ConnectionPool<S> {
    slots: Vec<Option<Rc<S>>>,
    occupied_end: usize,
    capacity: Option<usize>,
}

impl<S> Default for ConnectionPool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ConnectionPool<S> {
    /// Creates a pool with no capacity bound.
    pub fn new() -> Self {
        ConnectionPool {
            slots: Vec::new(),
            occupied_end: 0,
            capacity: None,
        }
    }

    /// Creates a pool that rejects `connect` once `capacity` sinks are
    /// simultaneously connected.
    pub fn with_capacity(capacity: usize) -> Self {
        ConnectionPool {
            slots: Vec::new(),
            occupied_end: 0,
            capacity: Some(capacity),
        }
    }

    /// Places `sink` in the lowest-index free slot, growing the backing
    /// vector if every existing slot is occupied. Returns the new cookie.
    pub fn connect(&mut self, sink: S) -> Result<Cookie> {
        if let Some(idx) = self.slots[..self.occupied_end]
            .iter()
            .position(|slot| slot.is_none())
        {
            self.slots[idx] = Some(Rc::new(sink));
            return Ok(idx + 1);
        }
        if let Some(capacity) = self.capacity {
            if self.len() >= capacity {
                return Err(Error::ConnectionLimit(capacity));
            }
        }
        self.slots.push(Some(Rc::new(sink)));
        self.occupied_end = self.slots.len();
        Ok(self.slots.len())
    }

    /// Disconnects `cookie`. A no-op if `cookie` is zero or does not name a
    /// currently connected sink, including a cookie that was already
    /// disconnected, so calling this twice in a row is safe.
    pub fn disconnect(&mut self, cookie: Cookie) {
        if cookie == 0 {
            return;
        }
        let idx = cookie - 1;
        if idx >= self.slots.len() {
            return;
        }
        self.slots[idx] = None;
        while self.occupied_end > 0 && self.slots[self.occupied_end - 1].is_none() {
            self.occupied_end -= 1;
        }
        self.slots.truncate(self.occupied_end);
    }

    /// The number of sinks currently connected.
    pub fn len(&self) -> usize {
        self.slots[..self.occupied_end]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }

    /// `true` if no sinks are connected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A point-in-time, ascending-cookie-order copy of the connected sinks.
    /// Cloning is an `Rc` bump, not a deep copy of `S`.
    pub fn snapshot(&self) -> Vec<Rc<S>> {
        self.slots[..self.occupied_end]
            .iter()
            .filter_map(|slot| slot.clone())
            .collect()
    }
}

/// The event-source side of an event interface: owns a [`ConnectionPool`]
/// behind a `RefCell` so sinks can reach back in and (dis)connect during a
/// `fire` without borrow conflicts.
pub struct EventSource<S> {
    pool: RefCell<ConnectionPool<S>>,
}

impl<S> Default for EventSource<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> EventSource<S> {
    /// Creates a source with no capacity bound.
    pub fn new() -> Self {
        EventSource {
            pool: RefCell::new(ConnectionPool::new()),
        }
    }

    /// Creates a source that rejects `connect` beyond `capacity` sinks.
    pub fn with_capacity(capacity: usize) -> Self {
        EventSource {
            pool: RefCell::new(ConnectionPool::with_capacity(capacity)),
        }
    }

    /// Connects `sink`, returning its cookie.
    pub fn connect(&self, sink: S) -> Result<Cookie> {
        self.pool.borrow_mut().connect(sink)
    }

    /// Disconnects `cookie`; a no-op for an unknown or already-disconnected
    /// cookie.
    pub fn disconnect(&self, cookie: Cookie) {
        self.pool.borrow_mut().disconnect(cookie);
    }

    /// The number of sinks currently connected.
    pub fn connection_count(&self) -> usize {
        self.pool.borrow().len()
    }

    /// Calls `call` for every connected sink, in ascending cookie order,
    /// returning the last sink's result (or `R::default()` if no sinks are
    /// connected). `call` typically closes over the event's arguments and
    /// invokes a method on the sink, e.g. `source.fire(|s| s.on_tick(42))`.
    pub fn fire<R: Default>(&self, mut call: impl FnMut(&S) -> R) -> R {
        let snapshot = self.pool.borrow().snapshot();
        let mut result = R::default();
        for sink in &snapshot {
            result = call(sink);
        }
        result
    }
}
