//! The object core: interface maps, reference counting, and aggregation.
//!
//! Every concrete component embeds an [`ObjectCore<Self>`] field and
//! implements [`Component`] to declare its interface map, and [`Root`] to
//! expose that map through a single object-safe entry point. `ObjectCore`
//! does the actual work: it walks the interface map, forwards queries when
//! the object is aggregated under an outer, and caches lazily-built
//! tear-offs.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::ptr::Ptr;
use crate::uid::{Uid, INNER_ROOT_UID, ROOT_UID};

/// Implemented by every concrete component class.
pub trait Component: Any + 'static {
    /// The UID this class is registered under.
    fn class_uid() -> Uid
    where
        Self: Sized;

    /// The ordered `(uid, resolver)` list this class declares. Queried in
    /// order; the first matching entry wins.
    fn interface_map() -> Vec<InterfaceEntry<Self>>
    where
        Self: Sized;
}

/// The object-safe entry point every component exposes, so a caller that
/// only has `Rc<dyn Root>` can still query for any interface by UID.
pub trait Root: Any {
    /// Queries this object (or, if aggregated, its outer) for `uid`.
    fn query_root(&self, uid: Uid) -> Result<Rc<dyn Any>>;

    /// This class's UID, for diagnostics and error messages.
    fn class_uid_dyn(&self) -> Uid;
}

impl std::fmt::Debug for dyn Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("dyn Root")
            .field("class_uid", &self.class_uid_dyn())
            .finish()
    }
}

/// One entry of a class's interface map.
pub struct InterfaceEntry<T: ?Sized> {
    uid: Uid,
    resolver: Resolver<T>,
}

impl<T: 'static> InterfaceEntry<T> {
    /// The object itself implements `uid`; `cast` reinterprets the self
    /// handle as that interface.
    pub fn direct(uid: Uid, cast: fn(&Rc<T>) -> Rc<dyn Any>) -> Self {
        InterfaceEntry {
            uid,
            resolver: Resolver::Direct(cast),
        }
    }

    /// `uid` is satisfied by a contained inner object. `resolve` is written
    /// by the outer class's author: it reaches into the outer's field
    /// holding the inner and calls that inner's [`ObjectCore::query_own`]
    /// directly, bypassing the inner's normal aggregation forwarding (which
    /// would otherwise bounce the query straight back to this outer).
    pub fn aggregate(uid: Uid, resolve: fn(&T, Uid) -> Result<Rc<dyn Any>>) -> Self {
        InterfaceEntry {
            uid,
            resolver: Resolver::Aggregate(resolve),
        }
    }

    /// `uid` is satisfied by an auxiliary object constructed lazily on
    /// first query and cached for the lifetime of this object.
    pub fn tear_off(uid: Uid, build: fn(&Rc<T>) -> Rc<dyn Any>) -> Self {
        InterfaceEntry {
            uid,
            resolver: Resolver::TearOff(build),
        }
    }
}

enum Resolver<T: ?Sized> {
    Direct(fn(&Rc<T>) -> Rc<dyn Any>),
    Aggregate(fn(&T, Uid) -> Result<Rc<dyn Any>>),
    TearOff(fn(&Rc<T>) -> Rc<dyn Any>),
}

/// Shared bookkeeping every component embeds: this object's own weak
/// self-reference (needed to hand out `Rc`-backed interface pointers), its
/// outer if aggregated, and the cache of already-built tear-offs.
pub struct ObjectCore<T: Component> {
    self_weak: RefCell<Weak<T>>,
    outer: Option<Ptr<dyn Root>>,
    tear_offs: RefCell<HashMap<Uid, Rc<dyn Any>>>,
}

impl<T: Component> ObjectCore<T> {
    /// Creates a new core. Pass `Some(outer)` for an aggregated object,
    /// `None` for a stand-alone one (including the `Static` and
    /// `MemberAggregated` lifetime variants, which are "stand-alone" from
    /// the core's point of view: they simply never get heap-freed).
    pub fn new(outer: Option<Ptr<dyn Root>>) -> Self {
        ObjectCore {
            self_weak: RefCell::new(Weak::new()),
            outer,
            tear_offs: RefCell::new(HashMap::new()),
        }
    }

    /// Binds this core to the `Rc` that owns it. Must be called exactly
    /// once, immediately after construction, in practice from inside the
    /// closure passed to [`Rc::new_cyclic`], which is how every factory in
    /// this workspace constructs components.
    pub fn bind(&self, self_weak: Weak<T>) {
        *self.self_weak.borrow_mut() = self_weak;
    }

    /// `true` if this object shares its identity and reference count with
    /// an outer controller.
    pub fn is_aggregated(&self) -> bool {
        self.outer.is_some()
    }

    fn self_rc(&self) -> Rc<T> {
        self.self_weak
            .borrow()
            .upgrade()
            .expect("ObjectCore::bind was never called before first query")
    }

    /// The full query algorithm: the private inner-root escape hatch, then
    /// aggregation forwarding, then this object's own interface map.
    pub fn query(&self, uid: Uid) -> Result<Rc<dyn Any>> {
        if uid == INNER_ROOT_UID {
            return Ok(self.self_rc() as Rc<dyn Any>);
        }
        if let Some(outer) = &self.outer {
            return outer.query_root(uid);
        }
        self.query_own(uid)
    }

    /// Walks this object's own interface map, ignoring aggregation. This is
    /// what an outer's `Aggregate` resolver calls on a contained inner: it
    /// reaches the inner's declared interfaces without bouncing back to
    /// itself through the inner's normal forwarding `query`.
    pub fn query_own(&self, uid: Uid) -> Result<Rc<dyn Any>> {
        if uid == ROOT_UID || uid == INNER_ROOT_UID {
            return Ok(self.self_rc() as Rc<dyn Any>);
        }
        for entry in T::interface_map() {
            if entry.uid == uid {
                return self.resolve(&entry.resolver, uid, &self.self_rc());
            }
        }
        Err(Error::NoSuchInterface(uid, T::class_uid()))
    }

    fn resolve(&self, resolver: &Resolver<T>, uid: Uid, self_rc: &Rc<T>) -> Result<Rc<dyn Any>> {
        match resolver {
            Resolver::Direct(cast) => Ok(cast(self_rc)),
            Resolver::Aggregate(resolve) => resolve(self_rc, uid),
            Resolver::TearOff(build) => Ok(self.tear_off(uid, build, self_rc)),
        }
    }

    fn tear_off(
        &self,
        uid: Uid,
        build: &fn(&Rc<T>) -> Rc<dyn Any>,
        self_rc: &Rc<T>,
    ) -> Rc<dyn Any> {
        if let Some(existing) = self.tear_offs.borrow().get(&uid) {
            return Rc::clone(existing);
        }
        let built = build(self_rc);
        self.tear_offs.borrow_mut().insert(uid, Rc::clone(&built));
        built
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ptr::{leak_static, StaticPtr};
    use crate::uid::Uid;
    use std::cell::Cell;
    use std::rc::Rc;

    const FOO_UID: Uid = Uid::new("test.object.Foo");
    const IBAR_UID: Uid = Uid::new("test.object.IBar");

    /// A minimal stand-alone component exposing one direct interface.
    struct Foo {
        core: ObjectCore<Foo>,
        bar_calls: Cell<u32>,
    }

    impl Foo {
        fn bump(&self) -> u32 {
            self.bar_calls.set(self.bar_calls.get() + 1);
            self.bar_calls.get()
        }
    }

    trait IBar {
        fn bump(&self) -> u32;
    }

    impl IBar for Foo {
        fn bump(&self) -> u32 {
            Foo::bump(self)
        }
    }

    impl Component for Foo {
        fn class_uid() -> Uid {
            FOO_UID
        }

        fn interface_map() -> Vec<InterfaceEntry<Foo>> {
            vec![InterfaceEntry::direct(IBAR_UID, |rc| {
                Rc::clone(rc) as Rc<dyn Any>
            })]
        }
    }

    impl Root for Foo {
        fn query_root(&self, uid: Uid) -> Result<Rc<dyn Any>> {
            self.core.query(uid)
        }

        fn class_uid_dyn(&self) -> Uid {
            FOO_UID
        }
    }

    #[test]
    fn root_query_is_reflexive() {
        let foo = Rc::new_cyclic(|_weak| Foo {
            core: ObjectCore::new(None),
            bar_calls: Cell::new(0),
        });
        foo.core.bind(Rc::downgrade(&foo));
        let root: Rc<dyn Any> = foo.core.query(ROOT_UID).unwrap();
        let back = root.downcast_ref::<Foo>().unwrap();
        assert!(std::ptr::eq(back, foo.as_ref()));
    }

    #[test]
    fn unknown_interface_fails() {
        let foo = Rc::new_cyclic(|_weak| Foo {
            core: ObjectCore::new(None),
            bar_calls: Cell::new(0),
        });
        foo.core.bind(Rc::downgrade(&foo));
        let err = foo.core.query(Uid::new("test.object.Missing")).unwrap_err();
        assert!(matches!(err, Error::NoSuchInterface(_, _)));
    }

    #[test]
    fn direct_interface_resolves_to_self() {
        let foo = Rc::new_cyclic(|_weak| Foo {
            core: ObjectCore::new(None),
            bar_calls: Cell::new(0),
        });
        foo.core.bind(Rc::downgrade(&foo));
        let iface = foo.core.query(IBAR_UID).unwrap();
        let as_foo = iface.downcast_ref::<Foo>().unwrap();
        assert_eq!(as_foo.bump(), 1);
    }

    #[test]
    fn tear_off_is_built_once_and_cached() {
        const TEAR_UID: Uid = Uid::new("test.object.TearOff");

        struct WithTearOff {
            core: ObjectCore<WithTearOff>,
            build_count: Cell<u32>,
        }

        impl Component for WithTearOff {
            fn class_uid() -> Uid {
                Uid::new("test.object.WithTearOff")
            }
            fn interface_map() -> Vec<InterfaceEntry<WithTearOff>> {
                vec![InterfaceEntry::tear_off(TEAR_UID, |rc| {
                    rc.build_count.set(rc.build_count.get() + 1);
                    Rc::new(rc.build_count.get()) as Rc<dyn Any>
                })]
            }
        }

        let obj = Rc::new_cyclic(|_weak| WithTearOff {
            core: ObjectCore::new(None),
            build_count: Cell::new(0),
        });
        obj.core.bind(Rc::downgrade(&obj));

        let first = obj.core.query(TEAR_UID).unwrap();
        let second = obj.core.query(TEAR_UID).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(obj.build_count.get(), 1);
    }

    #[test]
    fn static_lifetime_component_answers_queries_and_never_deallocates() {
        let foo = Rc::new_cyclic(|_weak| Foo {
            core: ObjectCore::new(None),
            bar_calls: Cell::new(0),
        });
        foo.core.bind(Rc::downgrade(&foo));
        let weak = Rc::downgrade(&foo);

        let static_foo = leak_static(foo);
        assert_eq!(StaticPtr::retain_count(&static_foo), 1);
        let other_handle = static_foo.retain();
        assert_eq!(StaticPtr::retain_count(&static_foo), 1, "a Static object's reported count never grows");

        let iface = static_foo.core.query(IBAR_UID).unwrap();
        assert_eq!(
            iface.downcast_ref::<Foo>().unwrap().bump(),
            1,
            "query still works exactly as it would on a heap object"
        );

        drop(static_foo);
        drop(other_handle);
        drop(iface);
        assert!(
            weak.upgrade().is_some(),
            "a Static object is never deallocated, even once every handle is gone"
        );
    }

    #[test]
    fn aggregated_inner_and_outer_resolve_the_same_interface_and_root() {
        const OUTER_UID: Uid = Uid::new("test.object.agg.Outer");
        const INNER_UID: Uid = Uid::new("test.object.agg.Inner");

        /// The aggregated inner: exposes `IBAR_UID` directly, and forwards
        /// everything else (including `ROOT_UID`) to its outer.
        struct Inner {
            core: ObjectCore<Inner>,
        }

        impl Component for Inner {
            fn class_uid() -> Uid {
                INNER_UID
            }
            fn interface_map() -> Vec<InterfaceEntry<Inner>> {
                vec![InterfaceEntry::direct(IBAR_UID, |rc| {
                    Rc::clone(rc) as Rc<dyn Any>
                })]
            }
        }

        impl Root for Inner {
            fn query_root(&self, uid: Uid) -> Result<Rc<dyn Any>> {
                self.core.query(uid)
            }
            fn class_uid_dyn(&self) -> Uid {
                INNER_UID
            }
        }

        /// The controller: holds the inner once it exists and answers
        /// `IBAR_UID` by forwarding into the inner's own interface map,
        /// bypassing the inner's aggregation forwarding.
        struct Outer {
            core: ObjectCore<Outer>,
            inner: RefCell<Option<Rc<Inner>>>,
        }

        impl Component for Outer {
            fn class_uid() -> Uid {
                OUTER_UID
            }
            fn interface_map() -> Vec<InterfaceEntry<Outer>> {
                vec![InterfaceEntry::aggregate(IBAR_UID, |outer: &Outer, uid| {
                    outer.inner.borrow().as_ref().unwrap().core.query_own(uid)
                })]
            }
        }

        impl Root for Outer {
            fn query_root(&self, uid: Uid) -> Result<Rc<dyn Any>> {
                self.core.query(uid)
            }
            fn class_uid_dyn(&self) -> Uid {
                OUTER_UID
            }
        }

        // The outer must exist (and be queryable as `Rc<dyn Root>`) before
        // the inner's `ObjectCore` can be given an outer pointer, so the
        // inner is wired in after the fact rather than as an `Outer` field
        // built in the same constructor call.
        let outer = Rc::new_cyclic(|_weak| Outer {
            core: ObjectCore::new(None),
            inner: RefCell::new(None),
        });
        outer.core.bind(Rc::downgrade(&outer));

        let outer_as_root = Rc::clone(&outer) as Rc<dyn Root>;
        let inner = Rc::new_cyclic(|_weak| Inner {
            core: ObjectCore::new(Some(Ptr::from_rc(outer_as_root))),
        });
        inner.core.bind(Rc::downgrade(&inner));
        *outer.inner.borrow_mut() = Some(Rc::clone(&inner));

        let via_outer = outer.core.query(IBAR_UID).unwrap();
        let via_inner = inner.core.query(IBAR_UID).unwrap();
        assert!(
            Rc::ptr_eq(&via_outer, &via_inner),
            "querying the outer and the aggregated inner for the same interface must return the same pointer"
        );

        let as_inner = via_inner.downcast_ref::<Inner>().unwrap();
        let root_via_interface = as_inner.core.query(ROOT_UID).unwrap();
        assert!(
            Rc::ptr_eq(&root_via_interface, &(Rc::clone(&outer) as Rc<dyn Any>)),
            "querying the returned interface for the root must reach the outer, not the inner"
        );
    }
}
