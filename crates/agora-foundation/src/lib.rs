//! Non-visual building blocks of the Agora form toolkit: the field
//! validation state machine, model bindings for checkbox fields, and
//! the small stat/date helpers the deliberation screens share.

mod binding;
mod field;
mod stats;

pub use binding::{BindingError, BoolFieldBinding, BooleanModel, SaveError};
pub use field::{FieldState, ValidationState};
pub use stats::{calculate_percentage, is_date_expired, number_of_days};
