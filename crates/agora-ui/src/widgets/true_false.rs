//! Boolean field bound to an external model property.

#![allow(non_snake_case)]

use agora_core::{with_current_composer, NodeId};
use agora_foundation::BoolFieldBinding;

use crate::composable;
use crate::handlers::ToggleHandler;
use crate::widgets::primitives::{Checkbox, CheckboxSpec};

#[derive(Clone)]
pub struct TrueFalseFieldProps {
    pub binding: BoolFieldBinding,
    pub can_edit: bool,
}

impl TrueFalseFieldProps {
    pub fn new(binding: BoolFieldBinding) -> Self {
        Self {
            binding,
            can_edit: true,
        }
    }

    pub fn can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }
}

/// Checkbox mirroring one boolean property of a model.
///
/// A toggle that leaves the value unchanged does nothing. A real change
/// saves through the binding; when the save fails the error is logged
/// and the checkbox keeps showing what the user chose, since the model
/// records the value regardless.
#[composable]
pub fn TrueFalseField(props: TrueFalseFieldProps) -> NodeId {
    with_current_composer(|composer| {
        // the model is outside the composition, so saves bump this
        // counter to get the checkbox re-rendered
        let revision = composer.use_state(|| 0u32);
        let on_toggle = {
            let binding = props.binding.clone();
            let can_edit = props.can_edit;
            let revision = revision.clone();
            ToggleHandler::new(move |checked| {
                if !can_edit {
                    return;
                }
                if checked == binding.current() {
                    return;
                }
                if let Err(err) = binding.save(checked) {
                    log::error!("failed to save '{}': {err}", binding.prop());
                }
                revision.update(|n| *n += 1);
            })
        };

        Checkbox(
            CheckboxSpec::new(props.binding.prop())
                .label(props.binding.prop())
                .checked(props.binding.current())
                .disabled(!props.can_edit)
                .on_toggle(on_toggle),
        )
    })
}

