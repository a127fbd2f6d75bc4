//! Message catalogs and locale resolution for the Agora form toolkit.
//!
//! Catalogs map dotted message keys to localized strings; a
//! [`Translations`] table keeps one catalog per locale code in
//! registration order. Locale selection is per thread (compositions are
//! single threaded), resolved against the built-in table through
//! [`get_locale`].

use std::cell::RefCell;
use std::sync::OnceLock;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// One locale's messages, keyed by dotted identifiers such as
/// `error.required`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: FxHashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Ordered registry of locale code to [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct Translations {
    catalogs: IndexMap<String, Catalog>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, code: impl Into<String>, catalog: Catalog) -> Self {
        self.catalogs.insert(code.into(), catalog);
        self
    }

    pub fn catalog(&self, code: &str) -> Option<&Catalog> {
        self.catalogs.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.catalogs.contains_key(code)
    }

    /// Locale codes in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// The toolkit's built-in English and French messages.
    pub fn builtin() -> Self {
        Self::new()
            .with_catalog(
                "en",
                Catalog::new()
                    .with("error.required", "This field is required.")
                    .with("form.gauge.count_label", "Number of gauges")
                    .with(
                        "form.gauge.count_helper",
                        "Participants move each gauge between its minimum and maximum.",
                    )
                    .with("form.gauge.section", "Gauge")
                    .with("form.gauge.instructions", "Gauge instructions")
                    .with("form.gauge.minimum", "Minimum value")
                    .with("form.gauge.maximum", "Maximum value")
                    .with("form.gauge.ticks", "Number of ticks")
                    .with("form.gauge.unit", "Unit"),
            )
            .with_catalog(
                "fr",
                Catalog::new()
                    .with("error.required", "Ce champ est obligatoire.")
                    .with("form.gauge.count_label", "Nombre de jauges")
                    .with(
                        "form.gauge.count_helper",
                        "Les participants déplacent chaque jauge entre son minimum et son maximum.",
                    )
                    .with("form.gauge.section", "Jauge")
                    .with("form.gauge.instructions", "Consignes de la jauge")
                    .with("form.gauge.minimum", "Valeur minimale")
                    .with("form.gauge.maximum", "Valeur maximale")
                    .with("form.gauge.ticks", "Nombre de graduations")
                    .with("form.gauge.unit", "Unité"),
            )
    }
}

/// Resolves a requested locale (say a browser's `fr-FR`) to a catalog
/// code: the lowercased primary subtag when a catalog exists for it,
/// `"en"` otherwise.
pub fn get_locale(requested: &str, translations: &Translations) -> String {
    let primary = requested
        .split('-')
        .next()
        .unwrap_or(requested)
        .to_lowercase();
    if translations.contains(&primary) {
        primary
    } else {
        "en".to_string()
    }
}

/// Registered locale codes other than `current`, in registration order.
pub fn available_locales(current: &str, translations: &Translations) -> Vec<String> {
    translations
        .codes()
        .filter(|code| *code != current)
        .map(str::to_string)
        .collect()
}

/// One language version of a user-entered value, as stored by the
/// deliberation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    pub locale_code: String,
    pub value: String,
}

impl LocalizedEntry {
    pub fn new(locale_code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            locale_code: locale_code.into(),
            value: value.into(),
        }
    }
}

/// Picks the entry matching `locale` out of a localized-entries list.
pub fn entry_value_for_locale<'a>(
    entries: &'a [LocalizedEntry],
    locale: &str,
) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.locale_code == locale)
        .map(|entry| entry.value.as_str())
}

fn builtin_table() -> &'static Translations {
    static TABLE: OnceLock<Translations> = OnceLock::new();
    TABLE.get_or_init(Translations::builtin)
}

thread_local! {
    static LOCALE: RefCell<String> = RefCell::new("en".to_string());
}

/// Selects the locale used by [`t`] on this thread. The request goes
/// through [`get_locale`], so an unregistered locale lands on `en`.
pub fn set_locale(requested: &str) {
    let resolved = get_locale(requested, builtin_table());
    LOCALE.with(|cell| *cell.borrow_mut() = resolved);
}

/// The locale code [`t`] currently translates into.
pub fn locale() -> String {
    LOCALE.with(|cell| cell.borrow().clone())
}

/// Message for `key` in the current locale. Falls back to the key
/// itself when the catalog has no entry, so callers always get a
/// non-empty string to show.
pub fn t(key: &str) -> String {
    let code = locale();
    match builtin_table().catalog(&code).and_then(|c| c.get(key)) {
        Some(text) => text.to_string(),
        None => {
            log::debug!("no '{code}' message for key '{key}'");
            key.to_string()
        }
    }
}
