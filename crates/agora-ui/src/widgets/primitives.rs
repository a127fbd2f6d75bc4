//! Node types and thin composables the form widgets are built from.
//!
//! Each widget emits one retained node and pushes the current pass's
//! parameters into it, whether the node was just created or reused.
//! Containers parent whatever their content emits.

#![allow(non_snake_case)]

use agora_core::{with_current_composer, Composer, Node, NodeId};
use agora_foundation::ValidationState;
use smallvec::SmallVec;

use crate::composable;
use crate::handlers::{BlurHandler, ChangeHandler, SelectHandler, ToggleHandler};
use crate::widgets::form_control::{ComponentClass, ControlKind};

/// Pushes this pass's parameters into an emitted node.
pub(crate) fn apply<N: Node>(composer: &Composer, id: NodeId, f: impl FnOnce(&mut N)) {
    if let Err(err) = composer.with_node_mut(id, f) {
        log::warn!(
            "failed to update {}: {err}",
            std::any::type_name::<N>()
        );
        debug_assert!(false, "failed to update emitted node: {err}");
    }
}

/// Wrapper a form control renders inside, carrying the field's current
/// validation verdict for styling hosts.
#[derive(Default)]
pub struct FormGroupNode {
    pub control_id: String,
    pub validation: Option<ValidationState>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node for FormGroupNode {
    fn update_children(&mut self, children: &[NodeId]) {
        self.children = children.iter().copied().collect();
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.to_vec()
    }

    fn describe(&self) -> String {
        match self.validation {
            Some(ValidationState::Error) => format!("FormGroup#{} (error)", self.control_id),
            None => format!("FormGroup#{}", self.control_id),
        }
    }
}

#[composable]
pub fn FormGroup(
    control_id: &str,
    validation: Option<ValidationState>,
    content: impl FnOnce(),
) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(FormGroupNode::default);
        apply(composer, id, |node: &mut FormGroupNode| {
            node.control_id = control_id.to_string();
            node.validation = validation;
        });
        composer.push_parent(id);
        content();
        composer.pop_parent();
        id
    })
}

/// Caption tied to a control by id.
#[derive(Default)]
pub struct LabelNode {
    pub for_id: String,
    pub text: String,
}

impl Node for LabelNode {
    fn describe(&self) -> String {
        format!("Label({:?})", self.text)
    }
}

#[composable]
pub fn Label(for_id: &str, text: &str) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(LabelNode::default);
        apply(composer, id, |node: &mut LabelNode| {
            node.for_id = for_id.to_string();
            node.text = text.to_string();
        });
        id
    })
}

/// Plain input field. `value` is whatever the caller passed down this
/// pass; edits reach the caller through `on_change` and come back as a
/// new value on the next pass.
#[derive(Default)]
pub struct TextInputNode {
    pub id: String,
    pub kind: ControlKind,
    pub component: ComponentClass,
    pub placeholder: String,
    pub value: String,
    pub disabled: bool,
    pub on_change: ChangeHandler,
    pub on_blur: BlurHandler,
}

impl Node for TextInputNode {
    fn describe(&self) -> String {
        format!("TextInput#{}", self.id)
    }
}

#[derive(Default)]
pub struct TextInputSpec {
    pub id: String,
    pub kind: ControlKind,
    pub component: ComponentClass,
    pub placeholder: String,
    pub value: String,
    pub disabled: bool,
    pub on_change: ChangeHandler,
    pub on_blur: BlurHandler,
}

impl TextInputSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ControlKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn component(mut self, component: ComponentClass) -> Self {
        self.component = component;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(mut self, handler: ChangeHandler) -> Self {
        self.on_change = handler;
        self
    }

    pub fn on_blur(mut self, handler: BlurHandler) -> Self {
        self.on_blur = handler;
        self
    }
}

#[composable]
pub fn TextInput(spec: TextInputSpec) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(TextInputNode::default);
        apply(composer, id, move |node: &mut TextInputNode| {
            node.id = spec.id;
            node.kind = spec.kind;
            node.component = spec.component;
            node.placeholder = spec.placeholder;
            node.value = spec.value;
            node.disabled = spec.disabled;
            node.on_change = spec.on_change;
            node.on_blur = spec.on_blur;
        });
        id
    })
}

#[derive(Default)]
pub struct CheckboxNode {
    pub id: String,
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
    pub on_toggle: ToggleHandler,
}

impl Node for CheckboxNode {
    fn describe(&self) -> String {
        format!(
            "Checkbox#{} [{}]",
            self.id,
            if self.checked { "x" } else { " " }
        )
    }
}

#[derive(Default)]
pub struct CheckboxSpec {
    pub id: String,
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
    pub on_toggle: ToggleHandler,
}

impl CheckboxSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_toggle(mut self, handler: ToggleHandler) -> Self {
        self.on_toggle = handler;
        self
    }
}

#[composable]
pub fn Checkbox(spec: CheckboxSpec) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(CheckboxNode::default);
        apply(composer, id, move |node: &mut CheckboxNode| {
            node.id = spec.id;
            node.label = spec.label;
            node.checked = spec.checked;
            node.disabled = spec.disabled;
            node.on_toggle = spec.on_toggle;
        });
        id
    })
}

/// Single-choice selector, a split-button in the deliberation admin UI.
#[derive(Default)]
pub struct DropdownNode {
    pub id: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub on_select: SelectHandler,
}

impl Node for DropdownNode {
    fn describe(&self) -> String {
        let current = self.items.get(self.selected).map(String::as_str);
        format!("Dropdown#{} ({})", self.id, current.unwrap_or("-"))
    }
}

#[derive(Default)]
pub struct DropdownSpec {
    pub id: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub on_select: SelectHandler,
}

impl DropdownSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn on_select(mut self, handler: SelectHandler) -> Self {
        self.on_select = handler;
        self
    }
}

#[composable]
pub fn Dropdown(spec: DropdownSpec) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(DropdownNode::default);
        apply(composer, id, move |node: &mut DropdownNode| {
            node.id = spec.id;
            node.items = spec.items;
            node.selected = spec.selected;
            node.on_select = spec.on_select;
        });
        id
    })
}

/// Inline message under a control, used for validation errors.
#[derive(Default)]
pub struct HelpBlockNode {
    pub text: String,
}

impl Node for HelpBlockNode {
    fn describe(&self) -> String {
        format!("HelpBlock({:?})", self.text)
    }
}

#[composable]
pub fn HelpBlock(text: &str) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(HelpBlockNode::default);
        apply(composer, id, |node: &mut HelpBlockNode| {
            node.text = text.to_string();
        });
        id
    })
}

/// Admin-form hint bubble, optionally illustrated.
#[derive(Default)]
pub struct HelperNode {
    pub text: String,
    pub image_url: Option<String>,
}

impl Node for HelperNode {
    fn describe(&self) -> String {
        "Helper".to_string()
    }
}

#[composable]
pub fn Helper(text: &str, image_url: Option<&str>) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(HelperNode::default);
        apply(composer, id, |node: &mut HelperNode| {
            node.text = text.to_string();
            node.image_url = image_url.map(str::to_string);
        });
        id
    })
}

#[derive(Default)]
pub struct SeparatorNode;

impl Node for SeparatorNode {
    fn describe(&self) -> String {
        "Separator".to_string()
    }
}

#[composable]
pub fn Separator() -> NodeId {
    with_current_composer(|composer| composer.emit_node(|| SeparatorNode))
}

/// Named container grouping related controls.
#[derive(Default)]
pub struct SectionNode {
    pub title: String,
    children: SmallVec<[NodeId; 4]>,
}

impl Node for SectionNode {
    fn update_children(&mut self, children: &[NodeId]) {
        self.children = children.iter().copied().collect();
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.to_vec()
    }

    fn describe(&self) -> String {
        format!("Section({:?})", self.title)
    }
}

#[composable]
pub fn Section(title: &str, content: impl FnOnce()) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(SectionNode::default);
        apply(composer, id, |node: &mut SectionNode| {
            node.title = title.to_string();
        });
        composer.push_parent(id);
        content();
        composer.pop_parent();
        id
    })
}
