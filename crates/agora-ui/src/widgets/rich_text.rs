//! Rich-text editor surface.
//!
//! The editor itself is an external collaborator; this widget only
//! carries the configuration contract across the boundary and routes
//! content updates back to the caller. Nothing here interprets the
//! content.

#![allow(non_snake_case)]

use agora_core::{with_current_composer, Node, NodeId};

use crate::composable;
use crate::handlers::ChangeHandler;
use crate::widgets::primitives::apply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Default)]
pub struct RichTextNode {
    pub raw_content: Option<String>,
    pub placeholder: String,
    pub toolbar_position: ToolbarPosition,
    pub with_attachment_button: bool,
    pub on_content_update: ChangeHandler,
}

impl Node for RichTextNode {
    fn describe(&self) -> String {
        format!("RichText({:?})", self.placeholder)
    }
}

pub struct RichTextEditorProps {
    pub raw_content: Option<String>,
    pub placeholder: String,
    pub toolbar_position: ToolbarPosition,
    pub with_attachment_button: bool,
    pub on_content_update: ChangeHandler,
}

impl Default for RichTextEditorProps {
    fn default() -> Self {
        Self {
            raw_content: None,
            placeholder: String::new(),
            toolbar_position: ToolbarPosition::Top,
            with_attachment_button: true,
            on_content_update: ChangeHandler::noop(),
        }
    }
}

impl RichTextEditorProps {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn raw_content(mut self, raw_content: Option<String>) -> Self {
        self.raw_content = raw_content;
        self
    }

    pub fn toolbar_position(mut self, position: ToolbarPosition) -> Self {
        self.toolbar_position = position;
        self
    }

    pub fn with_attachment_button(mut self, enabled: bool) -> Self {
        self.with_attachment_button = enabled;
        self
    }

    pub fn on_content_update(mut self, handler: ChangeHandler) -> Self {
        self.on_content_update = handler;
        self
    }
}

/// Emits the editor node with exactly the fields of the outbound
/// contract; `on_content_update` fires whenever the collaborator edits
/// the content.
#[composable]
pub fn RichTextEditor(props: RichTextEditorProps) -> NodeId {
    with_current_composer(|composer| {
        let id = composer.emit_node(RichTextNode::default);
        apply(composer, id, move |node: &mut RichTextNode| {
            node.raw_content = props.raw_content;
            node.placeholder = props.placeholder;
            node.toolbar_position = props.toolbar_position;
            node.with_attachment_button = props.with_attachment_button;
            node.on_content_update = props.on_content_update;
        });
        id
    })
}
