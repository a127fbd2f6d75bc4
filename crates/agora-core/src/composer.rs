use std::any::Any;
use std::cell::{Cell, RefCell, RefMut};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::node::{Applier, Node, NodeError, NodeId};
use crate::owned::Owned;
use crate::state::{MutableState, RuntimeHandle};

/// Positional identity of a group, derived from the call site.
pub type Key = u64;

pub(crate) enum Slot {
    Value(Box<dyn Any>),
    Node(NodeId),
}

pub(crate) struct GroupData {
    key: Key,
    slots: Vec<Slot>,
    children: SmallVec<[usize; 4]>,
}

/// Retained storage for remembered values and emitted nodes.
///
/// Groups form a tree mirroring the call structure of the content.
/// Within a group, slots are positional; between siblings, groups are
/// matched by key so inserted or reordered children do not invalidate
/// the rest of the row.
pub(crate) struct SlotTable {
    groups: Vec<GroupData>,
    free: Vec<usize>,
    root: usize,
}

impl SlotTable {
    pub(crate) fn new() -> Self {
        let root = GroupData {
            key: 0,
            slots: Vec::new(),
            children: SmallVec::new(),
        };
        Self {
            groups: vec![root],
            free: Vec::new(),
            root: 0,
        }
    }

    fn alloc(&mut self, key: Key) -> usize {
        if let Some(idx) = self.free.pop() {
            self.groups[idx].key = key;
            idx
        } else {
            self.groups.push(GroupData {
                key,
                slots: Vec::new(),
                children: SmallVec::new(),
            });
            self.groups.len() - 1
        }
    }

    /// Recursively frees a group, collecting every node id it owned.
    fn release(&mut self, idx: usize, removed: &mut Vec<NodeId>) {
        let slots = std::mem::take(&mut self.groups[idx].slots);
        let children = std::mem::take(&mut self.groups[idx].children);
        for slot in slots {
            if let Slot::Node(id) = slot {
                removed.push(id);
            }
        }
        for child in children {
            self.release(child, removed);
        }
        self.free.push(idx);
    }
}

pub(crate) trait ApplierHost {
    fn borrow_dyn(&self) -> RefMut<'_, dyn Applier>;
}

pub(crate) struct ApplierCell<A: Applier> {
    cell: RefCell<A>,
}

impl<A: Applier> ApplierCell<A> {
    pub(crate) fn new(applier: A) -> Self {
        Self {
            cell: RefCell::new(applier),
        }
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, A> {
        self.cell.borrow_mut()
    }
}

impl<A: Applier + 'static> ApplierHost for ApplierCell<A> {
    fn borrow_dyn(&self) -> RefMut<'_, dyn Applier> {
        RefMut::map(self.cell.borrow_mut(), |a| a as &mut dyn Applier)
    }
}

struct Frame {
    group: usize,
    slot_cursor: usize,
    child_cursor: usize,
}

struct ParentFrame {
    id: NodeId,
    children: SmallVec<[NodeId; 4]>,
}

struct ComposerInner {
    table: Rc<RefCell<SlotTable>>,
    applier: Rc<dyn ApplierHost>,
    runtime: RuntimeHandle,
    frames: RefCell<Vec<Frame>>,
    parents: RefCell<Vec<ParentFrame>>,
    root: Cell<Option<NodeId>>,
}

/// Drives one composition pass over a [`SlotTable`].
///
/// A composer is installed for the duration of `Composition::render`;
/// composable functions reach it through
/// [`crate::with_current_composer`]. Handles are cheap clones sharing
/// the same pass state.
///
/// Conditional content must live in its own group (a nested composable
/// call or [`Composer::with_group`]). Emitting nodes straight from an
/// `if` body shifts the positions of every slot after it and the group
/// would be rebuilt from that point on.
#[derive(Clone)]
pub struct Composer {
    inner: Rc<ComposerInner>,
}

const NOT_COMPOSING: &str = "composer used outside an active pass";

enum SlotPlan {
    Reuse,
    Replace(Option<NodeId>),
    Append,
}

impl Composer {
    pub(crate) fn new(
        table: Rc<RefCell<SlotTable>>,
        applier: Rc<dyn ApplierHost>,
        runtime: RuntimeHandle,
    ) -> Self {
        let root_group = table.borrow().root;
        Self {
            inner: Rc::new(ComposerInner {
                table,
                applier,
                runtime,
                frames: RefCell::new(vec![Frame {
                    group: root_group,
                    slot_cursor: 0,
                    child_cursor: 0,
                }]),
                parents: RefCell::new(Vec::new()),
                root: Cell::new(None),
            }),
        }
    }

    /// Runs `f` inside the group identified by `key`, creating or
    /// reusing it among the current group's children.
    pub fn with_group<R>(&self, key: Key, f: impl FnOnce(&Composer) -> R) -> R {
        self.begin_group(key);
        let result = f(self);
        self.end_group();
        result
    }

    fn begin_group(&self, key: Key) {
        let mut frames = self.inner.frames.borrow_mut();
        let frame = frames.last_mut().expect(NOT_COMPOSING);
        let mut table = self.inner.table.borrow_mut();
        let parent_idx = frame.group;
        let cursor = frame.child_cursor;
        let found = {
            let parent = &table.groups[parent_idx];
            parent.children[cursor..]
                .iter()
                .position(|&g| table.groups[g].key == key)
        };
        let group_idx = match found {
            Some(offset) => {
                if offset > 0 {
                    // bring the matching sibling to the cursor; skipped
                    // siblings stay in place and are either claimed later
                    // or dropped when the group closes
                    let child = table.groups[parent_idx].children.remove(cursor + offset);
                    table.groups[parent_idx].children.insert(cursor, child);
                }
                table.groups[parent_idx].children[cursor]
            }
            None => {
                let idx = table.alloc(key);
                table.groups[parent_idx].children.insert(cursor, idx);
                idx
            }
        };
        frame.child_cursor += 1;
        frames.push(Frame {
            group: group_idx,
            slot_cursor: 0,
            child_cursor: 0,
        });
    }

    fn end_group(&self) {
        let frame = self
            .inner
            .frames
            .borrow_mut()
            .pop()
            .expect(NOT_COMPOSING);
        self.close_frame(frame);
    }

    /// Drops slots and child groups the pass did not revisit.
    fn close_frame(&self, frame: Frame) {
        let mut removed = Vec::new();
        {
            let mut table = self.inner.table.borrow_mut();
            let (stale_slots, stale_children) = {
                let group = &mut table.groups[frame.group];
                let slots = group.slots.split_off(frame.slot_cursor);
                let children: SmallVec<[usize; 4]> =
                    group.children.drain(frame.child_cursor..).collect();
                (slots, children)
            };
            for slot in stale_slots {
                if let Slot::Node(id) = slot {
                    removed.push(id);
                }
            }
            for child in stale_children {
                table.release(child, &mut removed);
            }
        }
        for id in removed {
            self.remove_node(id);
        }
    }

    fn remove_node(&self, id: NodeId) {
        let mut applier = self.inner.applier.borrow_dyn();
        match applier.remove(id) {
            Ok(()) | Err(NodeError::Missing(_)) => {}
            Err(err) => {
                log::warn!("failed to remove node {id}: {err}");
                debug_assert!(false, "failed to remove node {id}: {err}");
            }
        }
    }

    fn plan_slot(&self, want_node: bool, is_wanted_value: &dyn Fn(&dyn Any) -> bool) -> SlotPlan {
        let frames = self.inner.frames.borrow();
        let frame = frames.last().expect(NOT_COMPOSING);
        let table = self.inner.table.borrow();
        let group = &table.groups[frame.group];
        if frame.slot_cursor >= group.slots.len() {
            return SlotPlan::Append;
        }
        match &group.slots[frame.slot_cursor] {
            Slot::Value(value) if !want_node && is_wanted_value(value.as_ref()) => SlotPlan::Reuse,
            Slot::Node(_) if want_node => SlotPlan::Reuse,
            Slot::Node(id) => SlotPlan::Replace(Some(*id)),
            Slot::Value(_) => SlotPlan::Replace(None),
        }
    }

    fn write_slot(&self, slot: Slot, append: bool) {
        let mut frames = self.inner.frames.borrow_mut();
        let frame = frames.last_mut().expect(NOT_COMPOSING);
        let mut table = self.inner.table.borrow_mut();
        let group = &mut table.groups[frame.group];
        if append {
            group.slots.push(slot);
        } else {
            group.slots[frame.slot_cursor] = slot;
        }
        frame.slot_cursor += 1;
    }

    fn advance_slot(&self) {
        let mut frames = self.inner.frames.borrow_mut();
        frames.last_mut().expect(NOT_COMPOSING).slot_cursor += 1;
    }

    /// Returns the value produced by `init` on the first pass through
    /// this position and the retained value on every later one.
    pub fn remember<T: 'static>(&self, init: impl FnOnce() -> T) -> Owned<T> {
        match self.plan_slot(false, &|value| value.is::<Owned<T>>()) {
            SlotPlan::Reuse => {
                let handle = {
                    let frames = self.inner.frames.borrow();
                    let frame = frames.last().expect(NOT_COMPOSING);
                    let table = self.inner.table.borrow();
                    let group = &table.groups[frame.group];
                    match &group.slots[frame.slot_cursor] {
                        Slot::Value(value) => value
                            .downcast_ref::<Owned<T>>()
                            .map(Owned::clone)
                            .expect("planned value reuse lost its slot"),
                        Slot::Node(_) => unreachable!("planned value reuse on a node slot"),
                    }
                };
                self.advance_slot();
                handle
            }
            SlotPlan::Replace(old) => {
                let fresh = Owned::new(init());
                self.write_slot(Slot::Value(Box::new(fresh.clone())), false);
                if let Some(id) = old {
                    self.remove_node(id);
                }
                fresh
            }
            SlotPlan::Append => {
                let fresh = Owned::new(init());
                self.write_slot(Slot::Value(Box::new(fresh.clone())), true);
                fresh
            }
        }
    }

    /// Remembered [`MutableState`] bound to this composition's runtime.
    pub fn use_state<T: 'static>(&self, init: impl FnOnce() -> T) -> MutableState<T> {
        let runtime = self.inner.runtime.clone();
        self.remember(move || MutableState::with_runtime(init(), runtime))
            .with(MutableState::clone)
    }

    /// Fresh state bound to this composition's runtime, not stored in
    /// the slot table. Callers keep it alive themselves.
    pub fn mutable_state_of<T: 'static>(&self, value: T) -> MutableState<T> {
        MutableState::with_runtime(value, self.inner.runtime.clone())
    }

    /// Emits a node of type `N` at the current position, reusing the
    /// one from the previous pass when the type still matches.
    pub fn emit_node<N: Node>(&self, init: impl FnOnce() -> N) -> NodeId {
        let plan = self.plan_slot(true, &|_| false);
        match plan {
            SlotPlan::Reuse => {
                let id = {
                    let frames = self.inner.frames.borrow();
                    let frame = frames.last().expect(NOT_COMPOSING);
                    let table = self.inner.table.borrow();
                    match table.groups[frame.group].slots[frame.slot_cursor] {
                        Slot::Node(id) => id,
                        Slot::Value(_) => unreachable!("planned node reuse on a value slot"),
                    }
                };
                let compatible = {
                    let mut applier = self.inner.applier.borrow_dyn();
                    match applier.get_mut(id) {
                        Ok(node) => {
                            let same_type = node.as_any_mut().downcast_mut::<N>().is_some();
                            if same_type {
                                node.update();
                            }
                            same_type
                        }
                        Err(_) => false,
                    }
                };
                if compatible {
                    self.advance_slot();
                    self.attach(id);
                    id
                } else {
                    log::trace!("node {id} replaced, type changed at call site");
                    self.replace_node(Some(id), init, false)
                }
            }
            SlotPlan::Replace(old) => self.replace_node(old, init, false),
            SlotPlan::Append => self.replace_node(None, init, true),
        }
    }

    fn replace_node<N: Node>(
        &self,
        old: Option<NodeId>,
        init: impl FnOnce() -> N,
        append: bool,
    ) -> NodeId {
        if let Some(id) = old {
            self.remove_node(id);
        }
        let node: Box<dyn Node> = Box::new(init());
        let id = self.inner.applier.borrow_dyn().create(node);
        self.write_slot(Slot::Node(id), append);
        self.attach(id);
        id
    }

    /// Runs `f` against an emitted node downcast to `N`. Widgets use
    /// this to push fresh parameters into a reused node.
    pub fn with_node_mut<N: Node, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let mut applier = self.inner.applier.borrow_dyn();
        let node = applier.get_mut(id)?;
        match node.as_any_mut().downcast_mut::<N>() {
            Some(typed) => Ok(f(typed)),
            None => Err(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            }),
        }
    }

    fn attach(&self, id: NodeId) {
        let mut parents = self.inner.parents.borrow_mut();
        if let Some(parent) = parents.last_mut() {
            parent.children.push(id);
        } else if self.inner.root.get().is_none() {
            self.inner.root.set(Some(id));
        }
    }

    /// Makes `id` the parent of every node emitted until the matching
    /// [`Composer::pop_parent`].
    pub fn push_parent(&self, id: NodeId) {
        self.inner.parents.borrow_mut().push(ParentFrame {
            id,
            children: SmallVec::new(),
        });
    }

    pub fn pop_parent(&self) {
        let frame = self
            .inner
            .parents
            .borrow_mut()
            .pop()
            .expect("pop_parent without matching push_parent");
        let mut applier = self.inner.applier.borrow_dyn();
        match applier.get_mut(frame.id) {
            Ok(node) => node.update_children(&frame.children),
            Err(err) => {
                log::warn!("parent node {} vanished mid pass: {err}", frame.id);
                debug_assert!(false, "parent node {} vanished mid pass", frame.id);
            }
        }
    }

    pub(crate) fn install<R>(&self, f: impl FnOnce(&Composer) -> R) -> R {
        struct Uninstall;
        impl Drop for Uninstall {
            fn drop(&mut self) {
                CURRENT.with(|stack| {
                    stack.borrow_mut().pop();
                });
            }
        }
        CURRENT.with(|stack| stack.borrow_mut().push(self.clone()));
        let _guard = Uninstall;
        f(self)
    }

    /// Closes the base frame and reports the first top level node.
    pub(crate) fn finish(&self) -> Option<NodeId> {
        debug_assert!(self.inner.parents.borrow().is_empty());
        let frame = self
            .inner
            .frames
            .borrow_mut()
            .pop()
            .expect(NOT_COMPOSING);
        debug_assert!(self.inner.frames.borrow().is_empty());
        self.close_frame(frame);
        self.inner.root.get()
    }
}

thread_local! {
    static CURRENT: RefCell<Vec<Composer>> = const { RefCell::new(Vec::new()) };
}

/// Hands the installed composer to `f`.
///
/// Panics when called outside `Composition::render`; composable
/// functions have no meaning without an active pass.
pub fn with_current_composer<R>(f: impl FnOnce(&Composer) -> R) -> R {
    let composer = CURRENT
        .with(|stack| stack.borrow().last().cloned())
        .expect("no composer installed; run content through Composition::render");
    f(&composer)
}
