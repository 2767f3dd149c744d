//! Enumeration-backed fields: single-select dropdown and multi-checkbox group

use crate::choices::Coerce;
use crate::conversion::FieldOptions;
use crate::field::{FieldCore, FieldError, FieldResult, FormField, Widget};
use crate::fields::core_from_options;
use crate::validators::Validator;
use std::fmt;
use std::sync::Arc;

// A select without a choice source accepts nothing; construction from a
// descriptor always supplies a real coercion function.
fn reject_all() -> Coerce {
	Arc::new(|value| Err(FieldError::InvalidChoice(value.to_string())))
}

/// Single-select dropdown over an enumeration's members
#[derive(Clone)]
pub struct SelectField {
	pub core: FieldCore,
	pub choices: Vec<(String, String)>,
	pub coerce: Coerce,
}

impl SelectField {
	pub fn new(name: impl Into<String>, choices: Vec<(String, String)>, coerce: Coerce) -> Self {
		Self {
			core: FieldCore::new(name),
			choices,
			coerce,
		}
	}

	pub fn from_options(mut options: FieldOptions) -> Self {
		let choices = options.choices.take().unwrap_or_default();
		let coerce = options.coerce.take().unwrap_or_else(reject_all);
		Self {
			core: core_from_options(&options),
			choices,
			coerce,
		}
	}
}

impl fmt::Debug for SelectField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectField")
			.field("core", &self.core)
			.field("choices", &self.choices)
			.finish()
	}
}

impl FormField for SelectField {
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
		Widget::Select
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		(self.coerce)(value)
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Checkbox group selecting any number of an enumeration's members.
///
/// A lone scalar submission is treated as a one-element selection, since
/// form encodings collapse a single checked box to a scalar.
#[derive(Clone)]
pub struct MultiCheckboxField {
	pub core: FieldCore,
	pub choices: Vec<(String, String)>,
	pub coerce: Coerce,
}

impl MultiCheckboxField {
	pub fn new(name: impl Into<String>, choices: Vec<(String, String)>, coerce: Coerce) -> Self {
		Self {
			core: FieldCore::new(name),
			choices,
			coerce,
		}
	}

	pub fn from_options(mut options: FieldOptions) -> Self {
		let choices = options.choices.take().unwrap_or_default();
		let coerce = options.coerce.take().unwrap_or_else(reject_all);
		Self {
			core: core_from_options(&options),
			choices,
			coerce,
		}
	}
}

impl fmt::Debug for MultiCheckboxField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MultiCheckboxField")
			.field("core", &self.core)
			.field("choices", &self.choices)
			.finish()
	}
}

impl FormField for MultiCheckboxField {
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
		Widget::CheckboxSelectMultiple
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let items = match value {
			serde_json::Value::Array(items) => items.clone(),
			other => vec![other.clone()],
		};
		let mut cleaned = Vec::with_capacity(items.len());
		for item in &items {
			cleaned.push((self.coerce)(item)?);
		}
		Ok(serde_json::Value::Array(cleaned))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}
