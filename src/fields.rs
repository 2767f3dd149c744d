pub mod boolean_field;
pub mod char_field;
pub mod choice_field;
pub mod number_field;
pub mod temporal_field;

pub use boolean_field::BooleanField;
pub use char_field::{EmailField, PasswordField, TextField};
pub use choice_field::{MultiCheckboxField, SelectField};
pub use number_field::{DecimalField, FloatField, IntegerField};
pub use temporal_field::{DateField, DateTimeField, TimeField};

use crate::conversion::FieldOptions;
use crate::field::FieldCore;

/// Shared constructor-argument handling: everything except the
/// choice-specific entries, which [`choice_field`] consumes itself.
pub(crate) fn core_from_options(options: &FieldOptions) -> FieldCore {
	FieldCore {
		name: options.name.clone(),
		label: options.label.clone(),
		description: options.description.clone(),
		required: options.required,
		default: options.default.clone(),
		validators: options.validators.clone(),
		readonly: false,
	}
}
