//! Scripted headless walkthrough of the admin form widgets.
//!
//! Composes the session screen, plays an editing session against it
//! through the form harness, and dumps the node tree after each step.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use agora_core::useState;
use agora_foundation::{BoolFieldBinding, BooleanModel, SaveError};
use agora_i18n::{available_locales, locale, set_locale, Translations};
use agora_testing::FormTestRule;
use agora_ui::{
    composable, ChangeHandler, ControlKind, FormControlProps, FormControlWithLabel, GaugesForm,
    Section, TrueFalseField, TrueFalseFieldProps,
};
use anyhow::Context;

/// In-memory stand-in for the deliberation backend's session record.
struct PreviewModel {
    values: HashMap<String, bool>,
}

impl PreviewModel {
    fn shared() -> Rc<RefCell<Self>> {
        let mut values = HashMap::new();
        values.insert("read_only".to_string(), false);
        Rc::new(RefCell::new(Self { values }))
    }
}

impl BooleanModel for PreviewModel {
    fn get(&self, prop: &str) -> Option<bool> {
        self.values.get(prop).copied()
    }

    fn save(&mut self, prop: &str, value: bool) -> Result<(), SaveError> {
        self.values.insert(prop.to_string(), value);
        log::info!("saved {prop} = {value}");
        Ok(())
    }
}

#[composable]
fn admin_screen(binding: BoolFieldBinding) {
    let title = useState(String::new);
    let title_writer = {
        let title = title.clone();
        ChangeHandler::new(move |text| title.set(text))
    };

    Section("session", move || {
        FormControlWithLabel(
            FormControlProps::new("session-title", "Session title")
                .required(true)
                .value(title.get())
                .on_change(title_writer),
        );
        FormControlWithLabel(
            FormControlProps::new("session-description", "Description")
                .kind(ControlKind::RichText),
        );
        TrueFalseField(TrueFalseFieldProps::new(binding).can_edit(true));
    });
    GaugesForm();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let requested = std::env::var("AGORA_LOCALE").unwrap_or_else(|_| "en".to_string());
    set_locale(&requested);
    println!("=== Agora Admin Preview ===");
    println!(
        "Locale: {} (also available: {})",
        locale(),
        available_locales(&locale(), &Translations::builtin()).join(", ")
    );
    println!();

    let model = PreviewModel::shared();
    let binding = BoolFieldBinding::new(model.clone(), "read_only")?;

    let mut rule = FormTestRule::new(move || admin_screen(binding.clone()));
    println!("--- initial screen ---");
    print!("{}", rule.dump_tree());

    println!();
    println!("--- committing the empty title ---");
    let title = rule
        .input_by_id("session-title")
        .context("session title input")?;
    rule.blur(title);
    print!("{}", rule.dump_tree());

    println!();
    println!("--- filling the session in ---");
    rule.enter_text(title, "Participatory budget 2027");
    rule.blur(title);

    let count = rule
        .dropdown_by_id("gauge-count")
        .context("gauge count selector")?;
    rule.select_item(count, 2);
    let instructions = rule
        .input_by_id("gauge-0-instructions")
        .context("first gauge instructions")?;
    rule.enter_text(instructions, "How strongly do you support the proposal?");
    let minimum = rule
        .input_by_id("gauge-0-minimum")
        .context("first gauge minimum")?;
    rule.enter_text(minimum, "0");
    let maximum = rule
        .input_by_id("gauge-0-maximum")
        .context("first gauge maximum")?;
    rule.enter_text(maximum, "10");

    let read_only = rule
        .checkbox_by_id("read_only")
        .context("read-only checkbox")?;
    rule.toggle(read_only, true);
    print!("{}", rule.dump_tree());

    println!();
    println!(
        "Model now holds read_only = {:?}",
        model.borrow().get("read_only")
    );
    Ok(())
}
