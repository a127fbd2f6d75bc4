//! Labeled form control.
//!
//! One widget covers every text-like field of the deliberation admin
//! screens: plain inputs, text areas, and the rich-text variant that
//! delegates to the external editor. The field's validation state lives
//! in composition state and changes only on the commit trigger (blur).

#![allow(non_snake_case)]

use agora_core::{with_current_composer, NodeId};
use agora_foundation::FieldState;
use agora_i18n::t;

use crate::composable;
use crate::handlers::{BlurHandler, ChangeHandler};
use crate::widgets::primitives::{FormGroup, HelpBlock, Label, TextInput, TextInputSpec};
use crate::widgets::rich_text::{RichTextEditor, RichTextEditorProps, ToolbarPosition};

/// What kind of value the control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    RichText,
}

/// Which concrete input element a plain control renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentClass {
    #[default]
    Input,
    TextArea,
}

/// Configuration of [`FormControlWithLabel`]. Every field has a
/// declared default; `value` is owned by the caller and `None` means
/// the caller holds no value yet, which is not the same as holding an
/// empty string.
#[derive(Clone)]
pub struct FormControlProps {
    pub id: String,
    pub label: String,
    pub kind: ControlKind,
    pub component_class: Option<ComponentClass>,
    pub required: bool,
    pub disabled: bool,
    pub label_always_visible: bool,
    pub value: Option<String>,
    pub on_change: ChangeHandler,
}

impl Default for FormControlProps {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            kind: ControlKind::Text,
            component_class: None,
            required: false,
            disabled: false,
            label_always_visible: false,
            value: None,
            on_change: ChangeHandler::noop(),
        }
    }
}

impl FormControlProps {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ControlKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn component_class(mut self, component_class: ComponentClass) -> Self {
        self.component_class = Some(component_class);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label_always_visible(mut self, always: bool) -> Self {
        self.label_always_visible = always;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn maybe_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn on_change(mut self, handler: ChangeHandler) -> Self {
        self.on_change = handler;
        self
    }
}

/// A label, the control, and the field's validation feedback.
///
/// The label shows when `label_always_visible` is set, or when a
/// non-rich-text field holds a non-empty value; a rich-text field never
/// shows it otherwise, since the editor displays the label as its
/// placeholder. Rich text delegates to [`RichTextEditor`] with the
/// toolbar pinned below the content and attachments disabled; every
/// other kind renders a [`TextInput`] whose blur commits the field.
/// Commit applies [`FieldState::after_commit`] with the pass's value
/// and the catalog's `error.required` message; an error shows as a
/// help block under the control and as the form group's validation
/// state.
#[composable]
pub fn FormControlWithLabel(props: FormControlProps) -> NodeId {
    with_current_composer(|composer| {
        let field_state = composer.use_state(FieldState::default);
        let state = field_state.get();

        let has_value = props.value.as_deref().map_or(false, |v| !v.is_empty());
        let display_label =
            props.label_always_visible || (props.kind != ControlKind::RichText && has_value);

        FormGroup(&props.id, state.validation, || {
            if display_label {
                Label(&props.id, &props.label);
            }

            if props.kind == ControlKind::RichText {
                RichTextEditor(
                    RichTextEditorProps::new(props.label.clone())
                        .raw_content(props.value.clone())
                        .toolbar_position(ToolbarPosition::Bottom)
                        .with_attachment_button(false)
                        .on_content_update(props.on_change.clone()),
                );
            } else {
                let commit = {
                    let field_state = field_state.clone();
                    let value = props.value.clone();
                    let required = props.required;
                    BlurHandler::new(move || {
                        field_state.set(FieldState::after_commit(
                            value.as_deref(),
                            required,
                            &t("error.required"),
                        ));
                    })
                };
                TextInput(
                    TextInputSpec::new(props.id.clone())
                        .kind(props.kind)
                        .component(props.component_class.unwrap_or_default())
                        .placeholder(props.label.clone())
                        .value(props.value.clone().unwrap_or_default())
                        .disabled(props.disabled)
                        .on_change(props.on_change.clone())
                        .on_blur(commit),
                );
            }

            if !state.error_message.is_empty() {
                HelpBlock(&state.error_message);
            }
        })
    })
}
