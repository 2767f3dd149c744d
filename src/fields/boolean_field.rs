//! Checkbox field for boolean input

use crate::conversion::FieldOptions;
use crate::field::{FieldCore, FieldError, FieldResult, FormField, Widget};
use crate::fields::core_from_options;
use crate::validators::Validator;

/// Checkbox input accepting booleans and the usual form-encoded spellings
#[derive(Debug, Clone)]
pub struct BooleanField {
	pub core: FieldCore,
}

impl BooleanField {
	/// Create a boolean field with the given name
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::fields::BooleanField;
	/// use schema_forms::field::FormField;
	/// use serde_json::json;
	///
	/// let field = BooleanField::new("subscribed");
	/// assert_eq!(field.clean(&json!("on")).unwrap(), json!(true));
	/// assert_eq!(field.clean(&json!(false)).unwrap(), json!(false));
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
		}
	}

	pub fn from_options(options: FieldOptions) -> Self {
		Self {
			core: core_from_options(&options),
		}
	}
}

impl FormField for BooleanField {
	fn name(&self) -> &str {
		&self.core.name
	}

	fn label(&self) -> &str {
		&self.core.label
	}

	fn description(&self) -> &str {
		&self.core.description
	}

	fn required(&self) -> bool {
		self.core.required
	}

	fn widget(&self) -> Widget {
		Widget::CheckboxInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		if let Some(b) = value.as_bool() {
			return Ok(serde_json::Value::Bool(b));
		}
		if let Some(s) = value.as_str() {
			match s.trim().to_ascii_lowercase().as_str() {
				"true" | "on" | "1" => return Ok(serde_json::Value::Bool(true)),
				"false" | "off" | "0" => return Ok(serde_json::Value::Bool(false)),
				_ => {}
			}
		}
		Err(FieldError::Validation(
			"Enter a valid boolean value.".to_string(),
		))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(true), true)]
	#[case(json!("on"), true)]
	#[case(json!("True"), true)]
	#[case(json!("1"), true)]
	#[case(json!(false), false)]
	#[case(json!("off"), false)]
	#[case(json!("0"), false)]
	fn test_boolean_field_spellings(#[case] input: serde_json::Value, #[case] expected: bool) {
		let field = BooleanField::new("flag");
		assert_eq!(field.clean(&input).unwrap(), json!(expected));
	}

	#[rstest]
	fn test_boolean_field_rejects_garbage() {
		let field = BooleanField::new("flag");
		assert!(field.clean(&json!("maybe")).is_err());
		assert!(field.clean(&json!(2)).is_err());
	}
}
