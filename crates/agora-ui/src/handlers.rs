//! Shared callback wrappers stored inside emitted nodes.
//!
//! Widgets take plain closures and wrap them once; the wrappers are
//! cheap clones of the same underlying `FnMut`, so a handler cloned out
//! of a node by an event driver reaches the closure the caller passed
//! in. Handlers run outside the render pass.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Carries the new text of an input or rich-text area to the caller.
#[derive(Clone)]
pub struct ChangeHandler {
    callback: Rc<RefCell<dyn FnMut(String)>>,
}

impl ChangeHandler {
    pub fn new(callback: impl FnMut(String) + 'static) -> Self {
        Self {
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn emit(&self, value: String) {
        (self.callback.borrow_mut())(value);
    }
}

impl Default for ChangeHandler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler(..)")
    }
}

/// Fires when focus leaves a field; the commit trigger.
#[derive(Clone)]
pub struct BlurHandler {
    callback: Rc<RefCell<dyn FnMut()>>,
}

impl BlurHandler {
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn emit(&self) {
        (self.callback.borrow_mut())();
    }
}

impl Default for BlurHandler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for BlurHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlurHandler(..)")
    }
}

/// Carries a checkbox's new checked state.
#[derive(Clone)]
pub struct ToggleHandler {
    callback: Rc<RefCell<dyn FnMut(bool)>>,
}

impl ToggleHandler {
    pub fn new(callback: impl FnMut(bool) + 'static) -> Self {
        Self {
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn emit(&self, checked: bool) {
        (self.callback.borrow_mut())(checked);
    }
}

impl Default for ToggleHandler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ToggleHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToggleHandler(..)")
    }
}

/// Carries the index picked in a dropdown.
#[derive(Clone)]
pub struct SelectHandler {
    callback: Rc<RefCell<dyn FnMut(usize)>>,
}

impl SelectHandler {
    pub fn new(callback: impl FnMut(usize) + 'static) -> Self {
        Self {
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn emit(&self, index: usize) {
        (self.callback.borrow_mut())(index);
    }
}

impl Default for SelectHandler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for SelectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectHandler(..)")
    }
}
