//! Named probes: runtime-addressable instrumentation points that emit
//! scalar samples to connected observers.
//!
//! A probe is an [`EventSource`] specialised to a `Fn(f64)` sink. Structurally
//! this module mirrors [`crate::registry`]: a UID-keyed table, a
//! process-wide singleton reachable through free functions, and a
//! first-touch-wins lookup (except here the first touch *creates* the
//! entry rather than requiring it to be registered up front, since a probe
//! has no factory to invoke).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::event::{Cookie, EventSource};
use crate::uid::Uid;

/// A single named instrumentation point.
pub struct Probe {
    uid: Uid,
    source: EventSource<Box<dyn Fn(f64)>>,
}

impl Probe {
    fn new(uid: Uid) -> Self {
        Probe {
            uid,
            source: EventSource::new(),
        }
    }

    /// The UID this probe is registered under.
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Attaches an observer, returning its cookie.
    pub fn connect(&self, observer: Box<dyn Fn(f64)>) -> Result<Cookie> {
        self.source.connect(observer)
    }

    /// Detaches a previously connected observer.
    pub fn disconnect(&self, cookie: Cookie) {
        self.source.disconnect(cookie);
    }

    /// Delivers `sample` to every connected observer.
    pub fn emit(&self, sample: f64) {
        self.source.fire::<()>(|observer| observer(sample));
    }

    /// The number of observers currently attached.
    pub fn observer_count(&self) -> usize {
        self.source.connection_count()
    }
}

/// A table of named probes, keyed by [`Uid`] the same way [`crate::registry::Registry`]
/// keys class factories.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: RefCell<HashMap<Uid, Rc<Probe>>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        ProbeRegistry {
            probes: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the probe named `uid`, creating it on first use. Repeated
    /// calls with the same UID return the same underlying probe, so model
    /// code and observing code can look a probe up independently without
    /// coordinating who creates it first.
    pub fn probe(&self, uid: Uid) -> Rc<Probe> {
        if let Some(existing) = self.probes.borrow().get(&uid) {
            return Rc::clone(existing);
        }
        let probe = Rc::new(Probe::new(uid));
        self.probes.borrow_mut().insert(uid, Rc::clone(&probe));
        probe
    }

    /// Returns the probe named `uid` only if it already exists.
    pub fn get(&self, uid: Uid) -> Option<Rc<Probe>> {
        self.probes.borrow().get(&uid).cloned()
    }

    /// Removes `uid` from the registry. Existing handles to the probe
    /// remain valid; only the registry's own reference is dropped.
    pub fn remove(&self, uid: Uid) -> Result<()> {
        self.probes
            .borrow_mut()
            .remove(&uid)
            .map(|_| ())
            .ok_or(Error::NotRegistered(uid))
    }

    /// The number of distinct probes currently registered.
    pub fn len(&self) -> usize {
        self.probes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.borrow().is_empty()
    }
}

thread_local! {
    static GLOBAL: ProbeRegistry = ProbeRegistry::new();
}

/// Returns the probe named `uid` in the process-wide registry, creating it
/// on first use.
pub fn probe(uid: Uid) -> Rc<Probe> {
    GLOBAL.with(|registry| registry.probe(uid))
}

/// Looks up `uid` in the process-wide registry without creating it.
pub fn get(uid: Uid) -> Option<Rc<Probe>> {
    GLOBAL.with(|registry| registry.get(uid))
}

/// Removes `uid` from the process-wide registry, if present.
pub fn remove(uid: Uid) -> Result<()> {
    GLOBAL.with(|registry| registry.remove(uid))
}
