//! Form widgets of the Agora deliberation toolkit.
//!
//! Widgets are composable functions emitting retained nodes into an
//! `agora_core` composition. The tree is headless: rendering, layout
//! and styling belong to the embedding host, which reads nodes back
//! through the applier. `FormControlWithLabel` is the workhorse; the
//! gauges admin form and the true/false field build on it and on the
//! primitives.

pub use agora_macros::composable;

mod handlers;
pub mod widgets;

pub use handlers::{BlurHandler, ChangeHandler, SelectHandler, ToggleHandler};
pub use widgets::form_control::{
    ComponentClass, ControlKind, FormControlProps, FormControlWithLabel,
};
pub use widgets::gauges::{GaugeForm, GaugeSettings, GaugesForm, MAX_GAUGES};
pub use widgets::primitives::{
    Checkbox, CheckboxNode, CheckboxSpec, Dropdown, DropdownNode, DropdownSpec, FormGroup,
    FormGroupNode, HelpBlock, HelpBlockNode, Helper, HelperNode, Label, LabelNode, Section,
    SectionNode, Separator, SeparatorNode, TextInput, TextInputNode, TextInputSpec,
};
pub use widgets::rich_text::{
    RichTextEditor, RichTextEditorProps, RichTextNode, ToolbarPosition,
};
pub use widgets::true_false::{TrueFalseField, TrueFalseFieldProps};
