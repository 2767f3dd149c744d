//! Field trait and shared field types

use crate::validators::Validator;
use serde::{Deserialize, Serialize};

/// Errors produced during field cleaning and validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required.")]
	Required,
	#[error("{0}")]
	Validation(String),
	#[error("'{0}' is not a valid choice.")]
	InvalidChoice(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// The presentation widget a field renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Widget {
	TextInput,
	PasswordInput,
	EmailInput,
	NumberInput,
	CheckboxInput,
	DateInput,
	DateTimeInput,
	TimeInput,
	Select,
	CheckboxSelectMultiple,
}

/// Whether a submitted value counts as absent for presence validation.
///
/// Null, the empty string, and an empty selection are all absent; `false`
/// and `0` are present values.
pub fn is_empty_value(value: &serde_json::Value) -> bool {
	match value {
		serde_json::Value::Null => true,
		serde_json::Value::String(s) => s.is_empty(),
		serde_json::Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

/// A concrete, renderable input field.
///
/// `clean` performs type coercion only; presence and cross-field checks run
/// afterwards through the field's validator chain, so that an absent value
/// on an optional field short-circuits before any further validation.
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;
	fn label(&self) -> &str;
	fn description(&self) -> &str;
	fn required(&self) -> bool;
	fn widget(&self) -> Widget;
	fn default(&self) -> Option<&serde_json::Value>;
	fn validators(&self) -> &[Validator];
	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value>;
	fn is_readonly(&self) -> bool;
	fn set_readonly(&mut self);
}

/// State shared by every concrete field implementation
#[derive(Debug, Clone, Default)]
pub struct FieldCore {
	pub name: String,
	pub label: String,
	pub description: String,
	pub required: bool,
	pub default: Option<serde_json::Value>,
	pub validators: Vec<Validator>,
	pub readonly: bool,
}

impl FieldCore {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: name.clone(),
			name,
			description: String::new(),
			required: true,
			default: None,
			validators: vec![],
			readonly: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), true)]
	#[case(json!(""), true)]
	#[case(json!([]), true)]
	#[case(json!("x"), false)]
	#[case(json!(0), false)]
	#[case(json!(false), false)]
	#[case(json!(["a"]), false)]
	fn test_is_empty_value(#[case] value: serde_json::Value, #[case] expected: bool) {
		assert_eq!(is_empty_value(&value), expected);
	}

	#[rstest]
	fn test_field_error_messages() {
		assert_eq!(FieldError::Required.to_string(), "This field is required.");
		assert_eq!(
			FieldError::InvalidChoice("test".to_string()).to_string(),
			"'test' is not a valid choice."
		);
		assert_eq!(
			FieldError::Validation("must be over 18 years old.".to_string()).to_string(),
			"must be over 18 years old."
		);
	}

	#[rstest]
	fn test_field_core_label_falls_back_to_name() {
		let core = FieldCore::new("age");
		assert_eq!(core.label, "age");
		assert!(core.description.is_empty());
	}
}
