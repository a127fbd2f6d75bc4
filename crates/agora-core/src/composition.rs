use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::composer::{ApplierCell, ApplierHost, Composer, Key, SlotTable};
use crate::node::{Applier, NodeError, NodeId};
use crate::state::{Runtime, RuntimeHandle};

/// Owns one retained content tree: the slot table, the applier holding
/// the nodes, and the runtime that collects invalidations.
///
/// Hosts call [`Composition::render`] with the same content whenever
/// [`Composition::should_render`] reports pending state writes. Passes
/// over an unchanged tree are cheap; remembered values and nodes are
/// reused in place.
pub struct Composition<A: Applier + 'static> {
    table: Rc<RefCell<SlotTable>>,
    applier: Rc<ApplierCell<A>>,
    runtime: Runtime,
    root: Option<NodeId>,
}

impl<A: Applier + 'static> Composition<A> {
    pub fn new(applier: A) -> Self {
        Self {
            table: Rc::new(RefCell::new(SlotTable::new())),
            applier: Rc::new(ApplierCell::new(applier)),
            runtime: Runtime::new(),
            root: None,
        }
    }

    /// Runs one pass of `content` under `key`.
    ///
    /// Pending invalidations are consumed by the pass; writes made by
    /// event handlers after it returns set [`Composition::should_render`]
    /// again.
    pub fn render(&mut self, key: Key, content: impl FnOnce()) -> Result<(), NodeError> {
        let host: Rc<dyn ApplierHost> = self.applier.clone();
        let composer = Composer::new(Rc::clone(&self.table), host, self.runtime.handle());
        let root = composer.install(|composer| {
            composer.with_group(key, |_| content());
            composer.finish()
        });
        self.root = root;
        self.runtime.handle().clear_dirty();
        Ok(())
    }

    /// True when state written since the last pass needs rendering.
    pub fn should_render(&self) -> bool {
        self.runtime.handle().is_dirty()
    }

    /// First node emitted at the top level of the last pass.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Direct access to the applier between passes.
    pub fn applier_mut(&self) -> RefMut<'_, A> {
        self.applier.borrow_mut()
    }
}
