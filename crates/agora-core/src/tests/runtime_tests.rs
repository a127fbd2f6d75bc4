use std::cell::{Cell, RefCell};
use std::rc::Rc;

use agora_macros::composable;

use crate::{
    location_key, remember, useState, with_current_composer, with_key, Applier, Composition,
    MemoryApplier, MutableState, Node, NodeError, NodeId,
};

#[derive(Default)]
struct Panel {
    children: Vec<NodeId>,
    updates: usize,
}

impl Node for Panel {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn update_children(&mut self, children: &[NodeId]) {
        self.children = children.to_vec();
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}

struct Tile {
    text: String,
}

impl Node for Tile {}

struct Badge;

impl Node for Badge {}

struct Tracked {
    events: Rc<RefCell<Vec<&'static str>>>,
}

impl Node for Tracked {
    fn mount(&mut self) {
        self.events.borrow_mut().push("mount");
    }

    fn update(&mut self) {
        self.events.borrow_mut().push("update");
    }

    fn unmount(&mut self) {
        self.events.borrow_mut().push("unmount");
    }
}

fn tile(text: &str) -> NodeId {
    with_current_composer(|composer| {
        composer.with_group(location_key(file!(), line!(), column!()), |composer| {
            let id = composer.emit_node(|| Tile {
                text: String::new(),
            });
            composer
                .with_node_mut(id, |node: &mut Tile| node.text = text.to_string())
                .unwrap();
            id
        })
    })
}

fn badge() -> NodeId {
    with_current_composer(|composer| {
        composer.with_group(location_key(file!(), line!(), column!()), |composer| {
            composer.emit_node(|| Badge)
        })
    })
}

#[composable]
fn panel(content: impl FnOnce()) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(Panel::default);
        composer.push_parent(id);
        content();
        composer.pop_parent();
        id
    })
}

fn panel_children(composition: &mut Composition<MemoryApplier>, id: NodeId) -> Vec<NodeId> {
    composition
        .applier_mut()
        .with_node(id, |panel: &mut Panel| panel.children.clone())
        .unwrap()
}

#[test]
fn remember_initializes_once() {
    let mut composition = Composition::new(MemoryApplier::new());
    let inits = Rc::new(Cell::new(0));
    for _ in 0..3 {
        let inits = Rc::clone(&inits);
        composition
            .render(1, move || {
                let value = remember(|| {
                    inits.set(inits.get() + 1);
                    41
                });
                assert_eq!(value.get(), 41);
            })
            .unwrap();
    }
    assert_eq!(inits.get(), 1);
}

#[test]
fn state_write_marks_composition_dirty() {
    let mut composition = Composition::new(MemoryApplier::new());
    let states: Rc<RefCell<Vec<MutableState<i32>>>> = Rc::new(RefCell::new(Vec::new()));
    let pass = |composition: &mut Composition<MemoryApplier>| {
        let states = Rc::clone(&states);
        composition
            .render(1, move || {
                let count = useState(|| 0);
                states.borrow_mut().push(count.clone());
            })
            .unwrap();
    };

    pass(&mut composition);
    assert!(!composition.should_render());

    let first = states.borrow()[0].clone();
    first.set(5);
    assert!(composition.should_render());

    pass(&mut composition);
    assert!(!composition.should_render());

    let second = states.borrow()[1].clone();
    assert!(first.ptr_eq(&second));
    assert_eq!(second.get(), 5);
}

#[test]
fn emitted_nodes_are_reused_between_passes() {
    let mut composition = Composition::new(MemoryApplier::new());
    let seen: Rc<RefCell<Vec<NodeId>>> = Rc::new(RefCell::new(Vec::new()));
    for text in ["one", "two"] {
        let seen = Rc::clone(&seen);
        composition
            .render(1, move || {
                let root = panel(|| {
                    tile(text);
                });
                seen.borrow_mut().push(root);
            })
            .unwrap();
    }

    let seen = seen.borrow();
    assert_eq!(seen[0], seen[1]);
    assert_eq!(composition.applier_mut().len(), 2);
    assert_eq!(composition.root(), Some(seen[0]));

    let children = panel_children(&mut composition, seen[0]);
    assert_eq!(children.len(), 1);
    let text = composition
        .applier_mut()
        .with_node(children[0], |tile: &mut Tile| tile.text.clone())
        .unwrap();
    assert_eq!(text, "two");

    let updates = composition
        .applier_mut()
        .with_node(seen[0], |panel: &mut Panel| panel.updates)
        .unwrap();
    assert_eq!(updates, 1);
}

#[test]
fn dropped_branch_removes_its_nodes() {
    let mut composition = Composition::new(MemoryApplier::new());
    let kept: Rc<Cell<Option<NodeId>>> = Rc::new(Cell::new(None));
    let root: Rc<Cell<Option<NodeId>>> = Rc::new(Cell::new(None));
    let pass = |composition: &mut Composition<MemoryApplier>, show_badge: bool| {
        let kept = Rc::clone(&kept);
        let root = Rc::clone(&root);
        composition
            .render(1, move || {
                root.set(Some(panel(|| {
                    if show_badge {
                        badge();
                    }
                    kept.set(Some(tile("kept")));
                })));
            })
            .unwrap();
    };

    pass(&mut composition, true);
    assert_eq!(composition.applier_mut().len(), 3);
    let tile_id = kept.get().unwrap();

    pass(&mut composition, false);
    assert_eq!(composition.applier_mut().len(), 2);
    // the tile kept its identity even though the badge in front went away
    assert_eq!(kept.get().unwrap(), tile_id);
    assert!(composition.applier_mut().contains(tile_id));
    assert_eq!(
        panel_children(&mut composition, root.get().unwrap()),
        vec![tile_id]
    );

    pass(&mut composition, true);
    assert_eq!(composition.applier_mut().len(), 3);
    assert_eq!(kept.get().unwrap(), tile_id);
}

#[test]
fn keyed_rows_keep_identity_across_reorder() {
    let mut composition = Composition::new(MemoryApplier::new());
    let ids: Rc<RefCell<Vec<(&'static str, NodeId)>>> = Rc::new(RefCell::new(Vec::new()));
    let pass = |composition: &mut Composition<MemoryApplier>, order: [&'static str; 3]| {
        let ids = Rc::clone(&ids);
        composition
            .render(1, move || {
                ids.borrow_mut().clear();
                panel(|| {
                    for name in order {
                        with_key(name, || {
                            let id = tile(name);
                            ids.borrow_mut().push((name, id));
                        });
                    }
                });
            })
            .unwrap();
    };

    pass(&mut composition, ["a", "b", "c"]);
    let before: Vec<_> = ids.borrow().clone();

    pass(&mut composition, ["c", "a", "b"]);
    let after: Vec<_> = ids.borrow().clone();

    assert_eq!(composition.applier_mut().len(), 4);
    for (name, id) in &after {
        let (_, old) = before.iter().find(|(n, _)| n == name).unwrap();
        assert_eq!(old, id, "row {name} lost its node");
    }
    assert_eq!(
        after.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
        vec!["c", "a", "b"]
    );
}

#[test]
fn type_change_at_a_position_replaces_the_node() {
    let mut composition = Composition::new(MemoryApplier::new());
    let emitted: Rc<Cell<Option<NodeId>>> = Rc::new(Cell::new(None));
    let pass = |composition: &mut Composition<MemoryApplier>, as_tile: bool| {
        let emitted = Rc::clone(&emitted);
        composition
            .render(1, move || {
                with_current_composer(|composer| {
                    let id = if as_tile {
                        composer.emit_node(|| Tile {
                            text: "t".to_string(),
                        })
                    } else {
                        composer.emit_node(|| Badge)
                    };
                    emitted.set(Some(id));
                });
            })
            .unwrap();
    };

    pass(&mut composition, true);
    let tile_id = emitted.get().unwrap();

    pass(&mut composition, false);
    let badge_id = emitted.get().unwrap();
    assert_ne!(tile_id, badge_id);
    assert_eq!(composition.applier_mut().len(), 1);
    assert!(!composition.applier_mut().contains(tile_id));
    assert!(composition
        .applier_mut()
        .with_node(badge_id, |_: &mut Badge| ())
        .is_ok());
}

#[test]
fn state_in_a_dropped_branch_is_forgotten() {
    let mut composition = Composition::new(MemoryApplier::new());
    let observed: Rc<Cell<i32>> = Rc::new(Cell::new(-1));
    let pass = |composition: &mut Composition<MemoryApplier>, show: bool| {
        let observed = Rc::clone(&observed);
        composition
            .render(1, move || {
                if show {
                    with_key("branch", || {
                        let count = useState(|| 0);
                        count.update(|c| *c += 1);
                        observed.set(count.get());
                    });
                }
            })
            .unwrap();
    };

    pass(&mut composition, true);
    assert_eq!(observed.get(), 1);
    pass(&mut composition, true);
    assert_eq!(observed.get(), 2);

    pass(&mut composition, false);
    pass(&mut composition, true);
    // the branch came back with a fresh slot
    assert_eq!(observed.get(), 1);
}

#[test]
fn lifecycle_hooks_fire_in_order() {
    let mut composition = Composition::new(MemoryApplier::new());
    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let pass = |composition: &mut Composition<MemoryApplier>, show: bool| {
        let events = Rc::clone(&events);
        composition
            .render(1, move || {
                if show {
                    with_key("tracked", || {
                        with_current_composer(|composer| {
                            composer.emit_node(|| Tracked {
                                events: Rc::clone(&events),
                            });
                        });
                    });
                }
            })
            .unwrap();
    };

    pass(&mut composition, true);
    pass(&mut composition, true);
    pass(&mut composition, false);
    assert_eq!(*events.borrow(), vec!["mount", "update", "unmount"]);
}

#[test]
fn applier_reports_missing_and_mismatched_nodes() {
    let mut applier = MemoryApplier::new();
    let id = applier.create(Box::new(Tile {
        text: "x".to_string(),
    }));
    assert_eq!(applier.len(), 1);

    let err = applier.with_node(id, |_: &mut Badge| ()).unwrap_err();
    assert!(matches!(err, NodeError::TypeMismatch { id: got, .. } if got == id));

    applier.remove(id).unwrap();
    assert!(applier.is_empty());
    assert_eq!(applier.remove(id), Err(NodeError::Missing(id)));
    assert_eq!(
        applier.with_node(id, |_: &mut Tile| ()),
        Err(NodeError::Missing(id))
    );
    assert_eq!(
        NodeError::Missing(7).to_string(),
        "node 7 does not exist"
    );
}

#[test]
fn dump_tree_shows_structure() {
    let mut composition = Composition::new(MemoryApplier::new());
    composition
        .render(1, || {
            panel(|| {
                tile("hello");
            });
        })
        .unwrap();
    let root = composition.root().unwrap();
    let dump = composition.applier_mut().dump_tree(root);
    let lines: Vec<_> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Panel"));
    assert!(lines[1].starts_with("  "));
    assert!(lines[1].contains("Tile"));
}

#[test]
fn composable_functions_nest() {
    #[composable]
    fn row() -> NodeId {
        tile("row")
    }

    let mut composition = Composition::new(MemoryApplier::new());
    let roots: Rc<RefCell<Vec<NodeId>>> = Rc::new(RefCell::new(Vec::new()));
    for _ in 0..2 {
        let roots = Rc::clone(&roots);
        composition
            .render(1, move || {
                let id = panel(|| {
                    row();
                    row();
                });
                roots.borrow_mut().push(id);
            })
            .unwrap();
    }
    assert_eq!(composition.applier_mut().len(), 3);
    let roots = roots.borrow();
    assert_eq!(roots[0], roots[1]);
    let children = panel_children(&mut composition, roots[0]);
    assert_eq!(children.len(), 2);
    assert_ne!(children[0], children[1]);
}
