//! Admin sub-form configuring the numeric gauges of a vote session.

#![allow(non_snake_case)]

use agora_core::{with_current_composer, with_key, MutableState, NodeId};
use agora_i18n::t;

use crate::composable;
use crate::handlers::{ChangeHandler, SelectHandler};
use crate::widgets::form_control::{ControlKind, FormControlProps, FormControlWithLabel};
use crate::widgets::primitives::{Dropdown, DropdownSpec, Helper, Label, Section, Separator};

/// Most gauges one vote session can carry.
pub const MAX_GAUGES: usize = 10;

/// Configuration of a single gauge. Everything starts unset; the admin
/// fills fields in over several edits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GaugeSettings {
    pub instructions: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub nb_ticks: Option<u32>,
    pub unit: Option<String>,
}

/// Gauge-count selector plus one [`GaugeForm`] per configured gauge.
///
/// The settings list lives in composition state. Picking a new count
/// resizes it: fresh defaults are appended, surplus entries dropped.
#[composable]
pub fn GaugesForm() -> NodeId {
    with_current_composer(|composer| {
        let gauges = composer.use_state(Vec::<GaugeSettings>::new);
        let count = gauges.with(Vec::len);

        Section("gauges", || {
            Label("gauge-count", &t("form.gauge.count_label"));
            Helper(&t("form.gauge.count_helper"), None);

            let on_select = {
                let gauges = gauges.clone();
                SelectHandler::new(move |index| {
                    let wanted = index.min(MAX_GAUGES);
                    gauges.update(|list| list.resize(wanted, GaugeSettings::default()));
                })
            };
            Dropdown(
                DropdownSpec::new("gauge-count")
                    .items((0..=MAX_GAUGES).map(|n| n.to_string()).collect())
                    .selected(count)
                    .on_select(on_select),
            );
            Separator();

            for index in 0..count {
                with_key(&index, || {
                    GaugeForm(index, gauges.clone());
                });
            }
        })
    })
}

/// Fields of one gauge, all rendered through [`FormControlWithLabel`].
/// Edits land back in `gauges` under this form's index; numeric fields
/// parse on change and an unparseable entry clears the stored number.
#[composable]
pub fn GaugeForm(index: usize, gauges: MutableState<Vec<GaugeSettings>>) -> NodeId {
    let settings = gauges.with(|list| list.get(index).cloned().unwrap_or_default());
    let title = format!("{} {}", t("form.gauge.section"), index + 1);

    let on_instructions = {
        let gauges = gauges.clone();
        ChangeHandler::new(move |text| {
            gauges.update(|list| {
                if let Some(gauge) = list.get_mut(index) {
                    gauge.instructions = Some(text);
                }
            });
        })
    };
    let on_minimum = {
        let gauges = gauges.clone();
        ChangeHandler::new(move |text| {
            let parsed = text.trim().parse::<f64>().ok();
            gauges.update(|list| {
                if let Some(gauge) = list.get_mut(index) {
                    gauge.minimum = parsed;
                }
            });
        })
    };
    let on_maximum = {
        let gauges = gauges.clone();
        ChangeHandler::new(move |text| {
            let parsed = text.trim().parse::<f64>().ok();
            gauges.update(|list| {
                if let Some(gauge) = list.get_mut(index) {
                    gauge.maximum = parsed;
                }
            });
        })
    };
    let on_ticks = {
        let gauges = gauges.clone();
        ChangeHandler::new(move |text| {
            let parsed = text.trim().parse::<u32>().ok();
            gauges.update(|list| {
                if let Some(gauge) = list.get_mut(index) {
                    gauge.nb_ticks = parsed;
                }
            });
        })
    };
    let on_unit = {
        let gauges = gauges.clone();
        ChangeHandler::new(move |text| {
            gauges.update(|list| {
                if let Some(gauge) = list.get_mut(index) {
                    gauge.unit = Some(text);
                }
            });
        })
    };

    Section(&title, || {
        FormControlWithLabel(
            FormControlProps::new(
                format!("gauge-{index}-instructions"),
                t("form.gauge.instructions"),
            )
            .required(true)
            .maybe_value(settings.instructions.clone())
            .on_change(on_instructions),
        );
        FormControlWithLabel(
            FormControlProps::new(format!("gauge-{index}-minimum"), t("form.gauge.minimum"))
                .kind(ControlKind::Number)
                .maybe_value(settings.minimum.map(|v| v.to_string()))
                .on_change(on_minimum),
        );
        FormControlWithLabel(
            FormControlProps::new(format!("gauge-{index}-maximum"), t("form.gauge.maximum"))
                .kind(ControlKind::Number)
                .maybe_value(settings.maximum.map(|v| v.to_string()))
                .on_change(on_maximum),
        );
        FormControlWithLabel(
            FormControlProps::new(format!("gauge-{index}-ticks"), t("form.gauge.ticks"))
                .kind(ControlKind::Number)
                .maybe_value(settings.nb_ticks.map(|v| v.to_string()))
                .on_change(on_ticks),
        );
        FormControlWithLabel(
            FormControlProps::new(format!("gauge-{index}-unit"), t("form.gauge.unit"))
                .maybe_value(settings.unit.clone())
                .on_change(on_unit),
        );
    })
}
