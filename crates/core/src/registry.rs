//! The UID registry: maps a class UID to a factory that produces instances
//! of that class.
//!
//! The registry is a process-wide singleton with lazy initialisation,
//! reachable through the free functions at the bottom of this module. It is
//! backed by a `thread_local!`, not a mutex: the runtime this crate serves
//! is single-threaded end to end (see the workspace's concurrency model),
//! so there is nothing to synchronise.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::object::Root;
use crate::ptr::Ptr;
use crate::uid::Uid;

/// A factory produces a fully constructed object with reference count one,
/// in the lifetime the caller asked for. `outer` is `Some` when the caller
/// wants the new instance aggregated under an existing controller; a
/// factory whose class cannot be aggregated must reject that with
/// [`Error::BadAggregation`] rather than silently ignoring `outer`.
pub type Factory = Rc<dyn Fn(Option<Ptr<dyn Root>>) -> Result<Ptr<dyn Root>>>;

/// A table of `(uid, factory)` registrations.
///
/// Most callers use the process-wide singleton via the free functions
/// below; `Registry` is also exposed directly so tests (and any host that
/// genuinely wants more than one registry, e.g. per test case for
/// isolation) can construct their own.
#[derive(Default)]
pub struct Registry {
    factories: RefCell<HashMap<Uid, Factory>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            factories: RefCell::new(HashMap::new()),
        }
    }

    /// Records `factory` under `uid`. Fails if `uid` is already registered.
    pub fn register(&self, uid: Uid, factory: Factory) -> Result<()> {
        let mut factories = self.factories.borrow_mut();
        if factories.contains_key(&uid) {
            return Err(Error::AlreadyRegistered(uid));
        }
        factories.insert(uid, factory);
        Ok(())
    }

    /// Removes the registration for `uid`, if any. Never fails.
    pub fn unregister(&self, uid: Uid) {
        self.factories.borrow_mut().remove(&uid);
    }

    /// Removes every registration. Never fails.
    pub fn unregister_all(&self) {
        self.factories.borrow_mut().clear();
    }

    /// Looks up the factory registered for `uid`.
    pub fn resolve(&self, uid: Uid) -> Result<Factory> {
        self.factories
            .borrow()
            .get(&uid)
            .cloned()
            .ok_or(Error::NotRegistered(uid))
    }

    /// Resolves `uid` and invokes its factory, returning a handle owning
    /// one reference to the new instance.
    pub fn create(&self, uid: Uid, outer: Option<Ptr<dyn Root>>) -> Result<Ptr<dyn Root>> {
        let factory = self.resolve(uid)?;
        factory(outer)
    }

    /// The number of classes currently registered.
    pub fn len(&self) -> usize {
        self.factories.borrow().len()
    }

    /// `true` if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.borrow().is_empty()
    }
}

thread_local! {
    static GLOBAL: Registry = Registry::new();
}

/// Registers `factory` under `uid` in the process-wide registry.
pub fn register(uid: Uid, factory: Factory) -> Result<()> {
    GLOBAL.with(|registry| registry.register(uid, factory))
}

/// Removes `uid`'s registration from the process-wide registry, if any.
pub fn unregister(uid: Uid) {
    GLOBAL.with(|registry| registry.unregister(uid));
}

/// Removes every registration from the process-wide registry. Intended for
/// test isolation between otherwise independent test cases.
pub fn clear() {
    GLOBAL.with(|registry| registry.unregister_all());
}

/// Looks up `uid`'s factory in the process-wide registry.
pub fn resolve(uid: Uid) -> Result<Factory> {
    GLOBAL.with(|registry| registry.resolve(uid))
}

/// Creates an instance of `uid` through the process-wide registry.
pub fn create(uid: Uid, outer: Option<Ptr<dyn Root>>) -> Result<Ptr<dyn Root>> {
    GLOBAL.with(|registry| registry.create(uid, outer))
}
