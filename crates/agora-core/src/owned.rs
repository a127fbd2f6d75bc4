use std::cell::RefCell;
use std::rc::Rc;

/// Shared mutable slot used for values remembered across passes.
///
/// Composition is single threaded, so interior mutability through
/// `Rc<RefCell<..>>` is enough. Handles are cheap to clone and all of
/// them see the same value.
pub struct Owned<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Reads through a shared borrow.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Mutates in place through an exclusive borrow.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Swaps the stored value, returning the old one.
    pub fn replace(&self, value: T) -> T {
        self.inner.replace(value)
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// True when both handles point at the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Owned<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Owned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Owned").field(&self.inner.borrow()).finish()
    }
}
