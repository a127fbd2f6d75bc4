//! True/false field behavior against a fake model store.

use std::cell::RefCell;
use std::rc::Rc;

use agora_foundation::{BoolFieldBinding, BooleanModel, SaveError};
use agora_testing::FormTestRule;
use agora_ui::{CheckboxNode, TrueFalseField, TrueFalseFieldProps};

struct RecordingModel {
    value: Option<bool>,
    fail_saves: bool,
    saves: Vec<bool>,
}

impl RecordingModel {
    fn shared(value: bool) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            value: Some(value),
            fail_saves: false,
            saves: Vec::new(),
        }))
    }
}

impl BooleanModel for RecordingModel {
    fn get(&self, _prop: &str) -> Option<bool> {
        self.value
    }

    fn save(&mut self, _prop: &str, value: bool) -> Result<(), SaveError> {
        self.value = Some(value);
        self.saves.push(value);
        if self.fail_saves {
            Err(SaveError::Rejected("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn rule_for(model: &Rc<RefCell<RecordingModel>>, can_edit: bool) -> FormTestRule {
    let binding = BoolFieldBinding::new(model.clone(), "read_only").unwrap();
    FormTestRule::new(move || {
        TrueFalseField(TrueFalseFieldProps::new(binding.clone()).can_edit(can_edit));
    })
}

#[test]
fn checkbox_mirrors_the_model() {
    let model = RecordingModel::shared(true);
    let mut rule = rule_for(&model, true);
    let checkbox = rule.checkbox_by_id("read_only").unwrap();
    assert!(rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.checked)
        .unwrap());
    assert!(!rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.disabled)
        .unwrap());
}

#[test]
fn toggling_a_new_value_saves_it() {
    let model = RecordingModel::shared(false);
    let mut rule = rule_for(&model, true);
    let checkbox = rule.checkbox_by_id("read_only").unwrap();

    rule.toggle(checkbox, true);
    assert_eq!(model.borrow().saves, vec![true]);
    assert!(rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.checked)
        .unwrap());
}

#[test]
fn toggling_the_same_value_does_not_save() {
    let model = RecordingModel::shared(false);
    let mut rule = rule_for(&model, true);
    let checkbox = rule.checkbox_by_id("read_only").unwrap();

    rule.toggle(checkbox, false);
    assert!(model.borrow().saves.is_empty());
}

#[test]
fn read_only_fields_ignore_toggles() {
    let model = RecordingModel::shared(false);
    let mut rule = rule_for(&model, false);
    let checkbox = rule.checkbox_by_id("read_only").unwrap();
    assert!(rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.disabled)
        .unwrap());

    rule.toggle(checkbox, true);
    assert!(model.borrow().saves.is_empty());
    assert!(!rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.checked)
        .unwrap());
}

#[test]
fn failed_saves_keep_the_chosen_value_visible() {
    let model = RecordingModel::shared(false);
    model.borrow_mut().fail_saves = true;
    let mut rule = rule_for(&model, true);
    let checkbox = rule.checkbox_by_id("read_only").unwrap();

    rule.toggle(checkbox, true);
    assert_eq!(model.borrow().saves, vec![true]);
    assert!(rule
        .with_node(checkbox, |node: &mut CheckboxNode| node.checked)
        .unwrap());
}
