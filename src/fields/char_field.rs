//! Text-shaped fields: plain text, password, and email input

use crate::conversion::FieldOptions;
use crate::field::{FieldCore, FieldError, FieldResult, FormField, Widget};
use crate::fields::core_from_options;
use crate::validators::Validator;
use regex::Regex;
use std::sync::LazyLock;

// Pragmatic email shape: one @, non-empty local part, dotted domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

fn clean_string(value: &serde_json::Value, strip: bool) -> FieldResult<String> {
	let s = value
		.as_str()
		.ok_or_else(|| FieldError::Validation("Value must be a string".to_string()))?;
	Ok(if strip { s.trim().to_string() } else { s.to_string() })
}

/// Single-line text input
#[derive(Debug, Clone)]
pub struct TextField {
	pub core: FieldCore,
	pub strip: bool,
}

impl TextField {
	/// Create a text field with the given name
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::fields::TextField;
	/// use schema_forms::field::FormField;
	///
	/// let field = TextField::new("username");
	/// assert_eq!(field.name(), "username");
	/// assert_eq!(field.label(), "username");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			strip: true,
		}
	}

	pub fn from_options(options: FieldOptions) -> Self {
		Self {
			core: core_from_options(&options),
			strip: true,
		}
	}

	/// Disable whitespace stripping
	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}
}

impl FormField for TextField {
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
		Widget::TextInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		clean_string(value, self.strip).map(serde_json::Value::String)
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Password input; submitted text is kept verbatim, never stripped
#[derive(Debug, Clone)]
pub struct PasswordField {
	pub core: FieldCore,
}

impl PasswordField {
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

impl FormField for PasswordField {
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
		Widget::PasswordInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		clean_string(value, false).map(serde_json::Value::String)
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Email input with format validation
#[derive(Debug, Clone)]
pub struct EmailField {
	pub core: FieldCore,
}

impl EmailField {
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

impl FormField for EmailField {
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
		Widget::EmailInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let s = clean_string(value, true)?;
		if EMAIL_REGEX.is_match(&s) {
			Ok(serde_json::Value::String(s))
		} else {
			Err(FieldError::Validation(
				"Enter a valid email address.".to_string(),
			))
		}
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}
