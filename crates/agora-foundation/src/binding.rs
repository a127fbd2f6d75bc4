use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Store of named boolean properties backing a checkbox field.
///
/// Persistence is entirely the implementor's concern. `save` records the
/// value and reports whether persisting it succeeded; the recorded value
/// stays in place either way, so a failed save leaves the field showing
/// what the user chose.
pub trait BooleanModel {
    fn get(&self, prop: &str) -> Option<bool>;
    fn save(&mut self, prop: &str, value: bool) -> Result<(), SaveError>;
}

/// Failure reported by a [`BooleanModel`] when persisting a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    Rejected(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Rejected(reason) => write!(f, "save rejected: {reason}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// Failure to bind a field to a model property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The model holds no boolean under the property name.
    Uninitialized { prop: String },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Uninitialized { prop } => {
                write!(f, "model property '{prop}' holds no boolean value")
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// A checkbox field's connection to one boolean property of a model.
///
/// Construction checks that the property is initialized, so widgets
/// never have to reason about a missing value mid-session.
#[derive(Clone)]
pub struct BoolFieldBinding {
    model: Rc<RefCell<dyn BooleanModel>>,
    prop: String,
}

impl BoolFieldBinding {
    pub fn new(
        model: Rc<RefCell<dyn BooleanModel>>,
        prop: impl Into<String>,
    ) -> Result<Self, BindingError> {
        let prop = prop.into();
        if model.borrow().get(&prop).is_none() {
            return Err(BindingError::Uninitialized { prop });
        }
        Ok(Self { model, prop })
    }

    pub fn prop(&self) -> &str {
        &self.prop
    }

    /// Value currently recorded by the model.
    pub fn current(&self) -> bool {
        match self.model.borrow().get(&self.prop) {
            Some(value) => value,
            None => {
                log::warn!("model dropped property '{}' after binding", self.prop);
                false
            }
        }
    }

    pub fn save(&self, value: bool) -> Result<(), SaveError> {
        self.model.borrow_mut().save(&self.prop, value)
    }
}

impl fmt::Debug for BoolFieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoolFieldBinding")
            .field("prop", &self.prop)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeModel {
        values: HashMap<String, bool>,
        fail_saves: bool,
        saves: Vec<(String, bool)>,
    }

    impl BooleanModel for FakeModel {
        fn get(&self, prop: &str) -> Option<bool> {
            self.values.get(prop).copied()
        }

        fn save(&mut self, prop: &str, value: bool) -> Result<(), SaveError> {
            self.values.insert(prop.to_string(), value);
            self.saves.push((prop.to_string(), value));
            if self.fail_saves {
                Err(SaveError::Rejected("backend unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn model_with(prop: &str, value: bool) -> Rc<RefCell<FakeModel>> {
        let mut model = FakeModel::default();
        model.values.insert(prop.to_string(), value);
        Rc::new(RefCell::new(model))
    }

    #[test]
    fn binding_requires_an_initialized_property() {
        let model = model_with("read_only", true);
        let err = BoolFieldBinding::new(model, "missing").unwrap_err();
        assert_eq!(
            err,
            BindingError::Uninitialized {
                prop: "missing".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "model property 'missing' holds no boolean value"
        );
    }

    #[test]
    fn binding_reads_and_saves_through_the_model() {
        let model = model_with("read_only", false);
        let binding = BoolFieldBinding::new(model.clone(), "read_only").unwrap();
        assert!(!binding.current());

        binding.save(true).unwrap();
        assert!(binding.current());
        assert_eq!(model.borrow().saves, vec![("read_only".to_string(), true)]);
    }

    #[test]
    fn failed_save_keeps_the_recorded_value() {
        let model = model_with("read_only", false);
        model.borrow_mut().fail_saves = true;
        let binding = BoolFieldBinding::new(model.clone(), "read_only").unwrap();

        let err = binding.save(true).unwrap_err();
        assert_eq!(err.to_string(), "save rejected: backend unavailable");
        assert!(binding.current());
    }
}
