use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A retained reference to an object, aliasing it for as long as the `Ptr`
/// is alive.
///
/// `Ptr<T>` wraps an [`Rc<T>`]: cloning it is `retain`, dropping it is
/// `release`, and the underlying storage is freed exactly when the last
/// `Ptr` is dropped. This is the single-threaded, non-atomic reference
/// count the component model requires; no `Ptr` ever crosses a thread
/// boundary.
pub struct Ptr<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Ptr<T> {
    /// Wraps an already-constructed `Rc` as a `Ptr`.
    pub fn from_rc(rc: Rc<T>) -> Self {
        Ptr(rc)
    }

    /// Returns the inner `Rc`, for callers that need to escape the newtype
    /// (for example, to build a `Weak` back-link).
    pub fn as_rc(&self) -> &Rc<T> {
        &self.0
    }

    /// Increments the reference count, returning a new handle to the same
    /// object.
    pub fn retain(&self) -> Ptr<T> {
        self.clone()
    }

    /// Decrements the reference count. Equivalent to dropping the handle;
    /// provided so call sites can spell out the contract explicitly.
    pub fn release(self) {
        drop(self)
    }

    /// The number of outstanding `Ptr`s (and `Rc`s) aliasing this object.
    pub fn retain_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    /// Returns `true` if both handles alias the very same object, the
    /// basis for the aggregation-identity invariant.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Ptr<T> {
    /// Allocates `value` on the heap and returns a retained handle to it
    /// with a reference count of one.
    pub fn new(value: T) -> Self {
        Ptr(Rc::new(value))
    }
}

impl<T: ?Sized> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        Ptr(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Ptr<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

thread_local! {
    // Holds one extra `Rc` clone per object handed to `leak_static`,
    // forever. Nothing ever drains this: that is what makes the held
    // objects immortal for the life of the thread.
    static STATIC_KEEPALIVE: RefCell<Vec<Rc<dyn Any>>> = RefCell::new(Vec::new());
}

/// A handle to a process-static object: the Static lifetime variant of
/// the component model (spec.md §4.2).
///
/// `retain`/`release` are no-ops and [`StaticPtr::retain_count`] always
/// reports `1`, matching a `Static`-lifetime object in the source
/// framework: its `AddRef`/`Release` do nothing and `GetRefCount()`
/// always returns `1`, because the object is never deallocated. `query`
/// still works exactly as it would on a heap object; only ownership is
/// different.
pub struct StaticPtr<T: ?Sized>(Rc<T>);

impl<T: ?Sized> StaticPtr<T> {
    /// Returns the inner `Rc`.
    pub fn as_rc(&self) -> &Rc<T> {
        &self.0
    }

    /// A no-op: a `StaticPtr` never needs a matching `release`.
    pub fn retain(&self) -> StaticPtr<T> {
        self.clone()
    }

    /// A no-op: dropping a `StaticPtr` never frees the object it names.
    pub fn release(self) {
        drop(self)
    }

    /// Always `1`: a static object's reported reference count never
    /// changes, regardless of how many handles to it exist.
    pub fn retain_count(_this: &Self) -> usize {
        1
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for StaticPtr<T> {
    fn clone(&self) -> Self {
        StaticPtr(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for StaticPtr<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for StaticPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Promotes `rc` to static lifetime: an extra clone is filed away in a
/// thread-local keepalive list that is never drained, so the object
/// outlives every [`StaticPtr`] (and every ordinary [`Ptr`]) that could
/// otherwise have dropped it. Call this once per object, at first
/// construction, the way a host would declare a `StaticObject` at
/// namespace scope.
pub fn leak_static<T: Any>(rc: Rc<T>) -> StaticPtr<T> {
    STATIC_KEEPALIVE.with(|keepalive| keepalive.borrow_mut().push(Rc::clone(&rc) as Rc<dyn Any>));
    StaticPtr(rc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_and_release_balance() {
        let p = Ptr::new(42i32);
        assert_eq!(Ptr::retain_count(&p), 1);
        let p2 = p.retain();
        assert_eq!(Ptr::retain_count(&p), 2);
        p2.release();
        assert_eq!(Ptr::retain_count(&p), 1);
    }

    #[test]
    fn ptr_eq_identifies_shared_storage() {
        let p = Ptr::new(String::from("shared"));
        let q = p.retain();
        let other = Ptr::new(String::from("shared"));
        assert!(Ptr::ptr_eq(&p, &q));
        assert!(!Ptr::ptr_eq(&p, &other));
    }

    #[test]
    fn static_ptr_reports_a_reference_count_of_one_regardless_of_sharing() {
        let handle = leak_static(Rc::new(42i32));
        assert_eq!(StaticPtr::retain_count(&handle), 1);
        let other = handle.retain();
        assert_eq!(StaticPtr::retain_count(&handle), 1);
        assert_eq!(StaticPtr::retain_count(&other), 1);
        assert!(StaticPtr::ptr_eq(&handle, &other));
        assert_eq!(*handle, 42);
    }

    #[test]
    fn static_ptr_outlives_every_handle_dropping_it() {
        let raw = Rc::new(String::from("immortal"));
        let weak = Rc::downgrade(&raw);
        let handle = leak_static(raw);
        drop(handle);
        assert!(weak.upgrade().is_some(), "the keepalive list must still hold a clone");
    }
}
