//! Date, datetime, and time fields

use crate::conversion::FieldOptions;
use crate::field::{FieldCore, FieldError, FieldResult, FormField, Widget};
use crate::fields::core_from_options;
use crate::validators::Validator;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Date input; cleans to ISO `YYYY-MM-DD`
#[derive(Debug, Clone)]
pub struct DateField {
	pub core: FieldCore,
	pub input_formats: Vec<String>,
}

impl DateField {
	/// Create a date field with the default input formats
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::fields::DateField;
	/// use schema_forms::field::FormField;
	/// use serde_json::json;
	///
	/// let field = DateField::new("birth_date");
	/// assert_eq!(field.clean(&json!("01/15/2025")).unwrap(), json!("2025-01-15"));
	/// assert!(field.clean(&json!("not a date")).is_err());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			input_formats: DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}

	pub fn from_options(options: FieldOptions) -> Self {
		Self {
			core: core_from_options(&options),
			input_formats: DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}
}

impl FormField for DateField {
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
		Widget::DateInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let s = value
			.as_str()
			.ok_or_else(|| FieldError::Validation("Enter a valid date.".to_string()))?
			.trim();
		for format in &self.input_formats {
			if let Ok(date) = NaiveDate::parse_from_str(s, format) {
				return Ok(serde_json::Value::String(
					date.format("%Y-%m-%d").to_string(),
				));
			}
		}
		Err(FieldError::Validation("Enter a valid date.".to_string()))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Date-and-time input; cleans to ISO `YYYY-MM-DDTHH:MM:SS`
#[derive(Debug, Clone)]
pub struct DateTimeField {
	pub core: FieldCore,
	pub input_formats: Vec<String>,
}

impl DateTimeField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			input_formats: DATETIME_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}

	pub fn from_options(options: FieldOptions) -> Self {
		Self {
			core: core_from_options(&options),
			input_formats: DATETIME_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}
}

impl FormField for DateTimeField {
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
		Widget::DateTimeInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let s = value
			.as_str()
			.ok_or_else(|| FieldError::Validation("Enter a valid date/time.".to_string()))?
			.trim();
		for format in &self.input_formats {
			if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
				return Ok(serde_json::Value::String(
					dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
				));
			}
		}
		Err(FieldError::Validation(
			"Enter a valid date/time.".to_string(),
		))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}

/// Time input; cleans to `HH:MM:SS`
#[derive(Debug, Clone)]
pub struct TimeField {
	pub core: FieldCore,
	pub input_formats: Vec<String>,
}

impl TimeField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			input_formats: TIME_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}

	pub fn from_options(options: FieldOptions) -> Self {
		Self {
			core: core_from_options(&options),
			input_formats: TIME_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}
}

impl FormField for TimeField {
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
		Widget::TimeInput
	}

	fn default(&self) -> Option<&serde_json::Value> {
		self.core.default.as_ref()
	}

	fn validators(&self) -> &[Validator] {
		&self.core.validators
	}

	fn clean(&self, value: &serde_json::Value) -> FieldResult<serde_json::Value> {
		let s = value
			.as_str()
			.ok_or_else(|| FieldError::Validation("Enter a valid time.".to_string()))?
			.trim();
		for format in &self.input_formats {
			if let Ok(time) = NaiveTime::parse_from_str(s, format) {
				return Ok(serde_json::Value::String(
					time.format("%H:%M:%S").to_string(),
				));
			}
		}
		Err(FieldError::Validation("Enter a valid time.".to_string()))
	}

	fn is_readonly(&self) -> bool {
		self.core.readonly
	}

	fn set_readonly(&mut self) {
		self.core.readonly = true;
	}
}
