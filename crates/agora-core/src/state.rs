use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Default)]
pub(crate) struct RuntimeInner {
    dirty: Cell<bool>,
}

/// Per-composition scheduler bookkeeping.
///
/// The runtime only tracks whether any state written since the last pass
/// requires another one. Hosts poll [`RuntimeHandle::is_dirty`] (through
/// `Composition::should_render`) and decide when to re-run the content.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::default()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle used by states to report writes back to their runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Handle not connected to any runtime. Writes through it are kept
    /// but never schedule a pass; tests use this for free-standing state.
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn mark_dirty(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.dirty.set(true);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.dirty.get())
            .unwrap_or(false)
    }

    pub fn clear_dirty(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.dirty.set(false);
        }
    }
}

struct StateCell<T> {
    value: RefCell<T>,
    runtime: RuntimeHandle,
}

/// Observable value slot.
///
/// Reads go through [`MutableState::with`] or [`MutableState::get`];
/// every write marks the owning runtime dirty so the host knows to
/// recompose. Clones share the same cell, which is what lets event
/// handlers captured during one pass feed values into the next.
pub struct MutableState<T> {
    cell: Rc<StateCell<T>>,
}

impl<T: 'static> MutableState<T> {
    /// State bound to `runtime`; writes schedule a recomposition there.
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            cell: Rc::new(StateCell {
                value: RefCell::new(value),
                runtime,
            }),
        }
    }

    /// Free-standing state for tests and plain data holders.
    pub fn detached(value: T) -> Self {
        Self::with_runtime(value, RuntimeHandle::detached())
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.cell.value.borrow_mut() = value;
        self.cell.runtime.mark_dirty();
    }

    /// Mutates in place and schedules a pass.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.cell.value.borrow_mut());
        self.cell.runtime.mark_dirty();
        result
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MutableState")
            .field(&self.cell.value.borrow())
            .finish()
    }
}
