//! Numeric fields: integer, float, and decimal input

use crate::conversion::FieldOptions;
use crate::field::{FieldCore, FieldError, FieldResult, FormField, Widget};
use crate::fields::core_from_options;
use crate::validators::Validator;
use regex::Regex;
use std::sync::LazyLock;

// Optional sign, digits, optional fractional part. No exponent, no
// inf/NaN spellings; those parse as floats but are not decimals.
static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?(\d+(\.\d+)?|\.\d+)$").expect("DECIMAL_REGEX: invalid regex pattern")
});

fn is_decimal_text(text: &str) -> bool {
	DECIMAL_REGEX.is_match(text)
}

/// Whole-number input
#[derive(Debug, Clone)]
pub struct IntegerField {
	pub core: FieldCore,
}

impl IntegerField {
	/// Create an integer field with the given name
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::fields::IntegerField;
	/// use schema_forms::field::FormField;
	/// use serde_json::json;
	///
	/// let field = IntegerField::new("age");
	/// assert_eq!(field.clean(&json!("42")).unwrap(), json!(42));
	/// assert!(field.clean(&json!("forty-two")).is_err());
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

impl FormField for IntegerField {
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
		Widget::NumberInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let parsed = if let Some(n) = value.as_i64() {
			Some(n)
		} else if let Some(s) = value.as_str() {
			s.trim().parse::<i64>().ok()
		} else {
			None
		};
		parsed
			.map(|n| serde_json::Value::Number(n.into()))
			.ok_or_else(|| FieldError::Validation("Enter a whole number.".to_string()))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Floating-point number input
#[derive(Debug, Clone)]
pub struct FloatField {
	pub core: FieldCore,
}

impl FloatField {
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

impl FormField for FloatField {
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
		Widget::NumberInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let parsed = if let Some(f) = value.as_f64() {
			Some(f)
		} else if let Some(s) = value.as_str() {
			s.trim().parse::<f64>().ok()
		} else {
			None
		};
		parsed
			.and_then(serde_json::Number::from_f64)
			.map(serde_json::Value::Number)
			.ok_or_else(|| FieldError::Validation("Enter a number.".to_string()))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Decimal number input.
///
/// Cleaned values keep their string representation: digit-exactness is
/// validated on the text, and converting to binary floating point would
/// lose it.
#[derive(Debug, Clone)]
pub struct DecimalField {
	pub core: FieldCore,
}

impl DecimalField {
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

impl FormField for DecimalField {
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
		Widget::NumberInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let text = if value.is_number() {
			value.to_string()
		} else if let Some(s) = value.as_str() {
			s.trim().to_string()
		} else {
			return Err(FieldError::Validation("Enter a number.".to_string()));
		};
		if !is_decimal_text(&text) {
			return Err(FieldError::Validation("Enter a number.".to_string()));
		}
		Ok(serde_json::Value::String(text))
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
	#[case(json!(42), json!(42))]
	#[case(json!("42"), json!(42))]
	#[case(json!(" -7 "), json!(-7))]
	fn test_integer_field_parses(#[case] input: serde_json::Value, #[case] expected: serde_json::Value) {
		let field = IntegerField::new("age");
		assert_eq!(field.clean(&input).unwrap(), expected);
	}

	#[rstest]
	#[case(json!("abc"))]
	#[case(json!(true))]
	#[case(json!("4.5"))]
	fn test_integer_field_rejects(#[case] input: serde_json::Value) {
		let field = IntegerField::new("age");
		assert!(field.clean(&input).is_err());
	}

	#[rstest]
	fn test_float_field_parses_number_and_string() {
		let field = FloatField::new("price");
		assert_eq!(field.clean(&json!(1.5)).unwrap(), json!(1.5));
		assert_eq!(field.clean(&json!("2.25")).unwrap(), json!(2.25));
		assert!(field.clean(&json!("two")).is_err());
	}

	#[rstest]
	fn test_decimal_field_keeps_string_representation() {
		let field = DecimalField::new("amount");
		assert_eq!(
			field.clean(&json!("10.010")).unwrap(),
			json!("10.010")
		);
		assert_eq!(field.clean(&json!(3)).unwrap(), json!("3"));
		assert!(field.clean(&json!("ten")).is_err());
	}

	#[rstest]
	#[case("-7.5")]
	#[case("+0.25")]
	#[case(".5")]
	fn test_decimal_field_accepts_signed_and_fractional(#[case] input: &str) {
		let field = DecimalField::new("amount");
		assert_eq!(field.clean(&json!(input)).unwrap(), json!(input));
	}

	#[rstest]
	#[case("inf")]
	#[case("NaN")]
	#[case("1e3")]
	#[case("1.")]
	fn test_decimal_field_rejects_float_spellings(#[case] input: &str) {
		// These parse as floats, but only plain digit forms are decimals.
		let field = DecimalField::new("amount");
		assert!(field.clean(&json!(input)).is_err());
	}
}
