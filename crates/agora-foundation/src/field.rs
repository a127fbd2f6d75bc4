/// Validation verdict attached to a committed field.
///
/// Carried as `Option<ValidationState>`; `None` means the field is
/// presentable as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Error,
}

/// Validation outcome of a labeled form control.
///
/// The state only ever changes on the commit trigger (focus leaving the
/// field), never per keystroke, and only through
/// [`FieldState::after_commit`]. The message is non-empty exactly when
/// the verdict is `Some(Error)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub validation: Option<ValidationState>,
    pub error_message: String,
}

impl FieldState {
    /// State after one commit of `value` under the given requiredness.
    ///
    /// A required field committed while empty or absent moves to
    /// `Error` carrying `required_message` (already localized by the
    /// caller, never empty); any other commit clears the state. The
    /// transition is total and idempotent, so committing twice without
    /// an intervening edit is indistinguishable from committing once.
    pub fn after_commit(value: Option<&str>, required: bool, required_message: &str) -> Self {
        if required && value.map_or(true, str::is_empty) {
            debug_assert!(!required_message.is_empty());
            Self {
                validation: Some(ValidationState::Error),
                error_message: required_message.to_string(),
            }
        } else {
            Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.validation == Some(ValidationState::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "This field is required.";

    #[test]
    fn required_and_empty_is_an_error() {
        for value in [None, Some("")] {
            let state = FieldState::after_commit(value, true, MESSAGE);
            assert_eq!(state.validation, Some(ValidationState::Error));
            assert_eq!(state.error_message, MESSAGE);
            assert!(state.is_error());
        }
    }

    #[test]
    fn required_and_filled_is_clear() {
        let state = FieldState::after_commit(Some("hello"), true, MESSAGE);
        assert_eq!(state, FieldState::default());
        assert!(!state.is_error());
    }

    #[test]
    fn optional_fields_never_error() {
        for value in [None, Some(""), Some("x")] {
            let state = FieldState::after_commit(value, false, MESSAGE);
            assert_eq!(state.validation, None);
            assert_eq!(state.error_message, "");
        }
    }

    #[test]
    fn commit_is_idempotent() {
        let once = FieldState::after_commit(None, true, MESSAGE);
        let twice = FieldState::after_commit(None, true, MESSAGE);
        assert_eq!(once, twice);

        let cleared = FieldState::after_commit(Some("v"), true, MESSAGE);
        assert_eq!(cleared, FieldState::after_commit(Some("v"), true, MESSAGE));
    }

    #[test]
    fn both_transitions_are_reachable_from_both_states() {
        // error -> clear
        let error = FieldState::after_commit(None, true, MESSAGE);
        assert!(error.is_error());
        let cleared = FieldState::after_commit(Some("filled"), true, MESSAGE);
        assert!(!cleared.is_error());
        // clear -> error
        let back = FieldState::after_commit(Some(""), true, MESSAGE);
        assert!(back.is_error());
        assert_eq!(back.error_message, MESSAGE);
    }

    #[test]
    fn message_tracks_the_caller_supplied_localization() {
        let state = FieldState::after_commit(None, true, "Ce champ est obligatoire.");
        assert_eq!(state.error_message, "Ce champ est obligatoire.");
    }
}
