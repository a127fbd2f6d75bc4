//! Robot-style driver for headless form testing.
//!
//! The rule lets a test:
//! - compose real widget content and recompose it on demand,
//! - find emitted nodes by type or by control id,
//! - play user events (typing, blur, toggles, dropdown picks) through
//!   the handlers the widgets stored in their nodes.
//!
//! # Example
//!
//! ```no_run
//! use agora_testing::FormTestRule;
//! use agora_ui::{FormControlProps, FormControlWithLabel};
//!
//! let mut rule = FormTestRule::new(|| {
//!     FormControlWithLabel(FormControlProps::new("title", "Title").required(true));
//! });
//! let input = rule.input_by_id("title").unwrap();
//! rule.blur(input);
//! assert_eq!(rule.help_texts().len(), 1);
//! ```

use agora_core::{
    location_key, Applier, Composition, Key, MemoryApplier, Node, NodeError, NodeId,
};
use agora_foundation::ValidationState;
use agora_ui::{
    CheckboxNode, DropdownNode, FormGroupNode, HelpBlockNode, LabelNode, RichTextNode,
    SectionNode, TextInputNode,
};

/// Owns one composition of form content and drives it like a user.
///
/// Events run outside the render pass; every driver recomposes until
/// the composition settles, so assertions always see the tree that
/// followed from the event.
pub struct FormTestRule {
    composition: Composition<MemoryApplier>,
    content: Box<dyn FnMut()>,
    key: Key,
}

impl FormTestRule {
    /// Composes `content` immediately.
    pub fn new(content: impl FnMut() + 'static) -> Self {
        let mut rule = Self {
            composition: Composition::new(MemoryApplier::new()),
            content: Box::new(content),
            key: location_key(file!(), line!(), column!()),
        };
        rule.recompose();
        rule
    }

    /// Runs one pass over the content.
    pub fn recompose(&mut self) {
        let content = &mut self.content;
        self.composition
            .render(self.key, || content())
            .expect("test composition failed to render");
    }

    /// Recomposes until no state writes are pending. Bails out after a
    /// fixed number of passes so a self-invalidating loop cannot hang
    /// the test.
    pub fn recompose_while_dirty(&mut self) {
        for _ in 0..16 {
            if !self.composition.should_render() {
                return;
            }
            self.recompose();
        }
        log::warn!("composition still dirty after 16 passes");
    }

    pub fn should_render(&self) -> bool {
        self.composition.should_render()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.composition.root()
    }

    /// Indented outline of the current tree.
    pub fn dump_tree(&mut self) -> String {
        match self.composition.root() {
            Some(root) => self.composition.applier_mut().dump_tree(root),
            None => String::new(),
        }
    }

    /// Runs `f` against the node at `id` downcast to `N`.
    pub fn with_node<N: Node, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        self.composition.applier_mut().with_node(id, f)
    }

    /// Every live node reachable from the root, in document order.
    pub fn all_ids(&mut self) -> Vec<NodeId> {
        let Some(root) = self.composition.root() else {
            return Vec::new();
        };
        let mut applier = self.composition.applier_mut();
        let mut stack = vec![root];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Ok(node) = applier.get_mut(id) {
                let mut children = node.children();
                children.reverse();
                stack.extend(children);
            }
        }
        out
    }

    /// Ids of all nodes of type `N`, in document order.
    pub fn find_all<N: Node>(&mut self) -> Vec<NodeId> {
        let ids = self.all_ids();
        let mut applier = self.composition.applier_mut();
        ids.into_iter()
            .filter(|&id| applier.with_node(id, |_: &mut N| ()).is_ok())
            .collect()
    }

    pub fn find_inputs(&mut self) -> Vec<NodeId> {
        self.find_all::<TextInputNode>()
    }

    pub fn input_by_id(&mut self, control_id: &str) -> Option<NodeId> {
        let ids = self.find_inputs();
        ids.into_iter().find(|&id| {
            self.with_node(id, |node: &mut TextInputNode| node.id == control_id)
                .unwrap_or(false)
        })
    }

    pub fn checkbox_by_id(&mut self, control_id: &str) -> Option<NodeId> {
        let ids = self.find_all::<CheckboxNode>();
        ids.into_iter().find(|&id| {
            self.with_node(id, |node: &mut CheckboxNode| node.id == control_id)
                .unwrap_or(false)
        })
    }

    pub fn dropdown_by_id(&mut self, control_id: &str) -> Option<NodeId> {
        let ids = self.find_all::<DropdownNode>();
        ids.into_iter().find(|&id| {
            self.with_node(id, |node: &mut DropdownNode| node.id == control_id)
                .unwrap_or(false)
        })
    }

    pub fn rich_texts(&mut self) -> Vec<NodeId> {
        self.find_all::<RichTextNode>()
    }

    /// Label captions in document order.
    pub fn labels(&mut self) -> Vec<String> {
        let ids = self.find_all::<LabelNode>();
        ids.into_iter()
            .filter_map(|id| self.with_node(id, |node: &mut LabelNode| node.text.clone()).ok())
            .collect()
    }

    /// Help-block texts in document order.
    pub fn help_texts(&mut self) -> Vec<String> {
        let ids = self.find_all::<HelpBlockNode>();
        ids.into_iter()
            .filter_map(|id| {
                self.with_node(id, |node: &mut HelpBlockNode| node.text.clone())
                    .ok()
            })
            .collect()
    }

    /// Section titles in document order.
    pub fn section_titles(&mut self) -> Vec<String> {
        let ids = self.find_all::<SectionNode>();
        ids.into_iter()
            .filter_map(|id| {
                self.with_node(id, |node: &mut SectionNode| node.title.clone())
                    .ok()
            })
            .collect()
    }

    /// Validation verdict of the form group wrapping `control_id`.
    pub fn group_validation(&mut self, control_id: &str) -> Option<Option<ValidationState>> {
        let ids = self.find_all::<FormGroupNode>();
        for id in ids {
            let matched = self
                .with_node(id, |node: &mut FormGroupNode| {
                    (node.control_id == control_id).then_some(node.validation)
                })
                .ok()
                .flatten();
            if matched.is_some() {
                return matched;
            }
        }
        None
    }

    /// Types `text` into the input: fires its change handler, then
    /// recomposes. The value shown next pass is whatever the caller's
    /// state now feeds back in.
    pub fn enter_text(&mut self, input: NodeId, text: &str) {
        let handler = self
            .with_node(input, |node: &mut TextInputNode| node.on_change.clone())
            .expect("enter_text target is not a TextInput");
        handler.emit(text.to_string());
        self.recompose_while_dirty();
    }

    /// Moves focus off the input, firing the commit trigger.
    pub fn blur(&mut self, input: NodeId) {
        let handler = self
            .with_node(input, |node: &mut TextInputNode| node.on_blur.clone())
            .expect("blur target is not a TextInput");
        handler.emit();
        self.recompose_while_dirty();
    }

    /// Sets a checkbox to `checked`.
    pub fn toggle(&mut self, checkbox: NodeId, checked: bool) {
        let handler = self
            .with_node(checkbox, |node: &mut CheckboxNode| node.on_toggle.clone())
            .expect("toggle target is not a Checkbox");
        handler.emit(checked);
        self.recompose_while_dirty();
    }

    /// Picks the item at `index` in a dropdown.
    pub fn select_item(&mut self, dropdown: NodeId, index: usize) {
        let handler = self
            .with_node(dropdown, |node: &mut DropdownNode| node.on_select.clone())
            .expect("select_item target is not a Dropdown");
        handler.emit(index);
        self.recompose_while_dirty();
    }

    /// Plays an edit coming back from the external rich-text editor.
    pub fn edit_rich_text(&mut self, editor: NodeId, content: &str) {
        let handler = self
            .with_node(editor, |node: &mut RichTextNode| {
                node.on_content_update.clone()
            })
            .expect("edit_rich_text target is not a RichText");
        handler.emit(content.to_string());
        self.recompose_while_dirty();
    }
}
