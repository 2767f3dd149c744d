//! Field validator chain: presence validators and the model-field adapter
//!
//! Every converted field carries exactly one presence validator first
//! ([`Validator::Required`] or [`Validator::Optional`]), followed by the
//! [`FieldValidator`] adapter when the model field declares its own
//! validation callable. The presence check must short-circuit before any
//! cross-field validation runs on an absent value.

use crate::field::{FieldError, FieldResult, is_empty_value};
use crate::schema::{FieldValidatorFn, ModelField};
use std::collections::HashMap;
use std::fmt;

/// Result of running one validator against a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
	/// Proceed to the next validator, optionally replacing the value with a
	/// normalized one.
	Continue(Option<serde_json::Value>),
	/// Skip the remaining validators (optional field left empty).
	Stop,
}

/// Adapter exposing a model field's own validation callable as an
/// input-field validator.
///
/// The callable receives the cleaned value and the full set of bound
/// sibling values, so cross-field rules work. Failure surfaces the
/// underlying message only. Two adapters compare equal when they wrap the
/// same underlying field, identified by the owning model's name and the
/// field name.
#[derive(Clone)]
pub struct FieldValidator {
	model: String,
	field: String,
	func: Option<FieldValidatorFn>,
}

impl FieldValidator {
	pub fn new(model: impl Into<String>, field: &ModelField) -> Self {
		Self {
			model: model.into(),
			field: field.name.clone(),
			func: field.validator.clone(),
		}
	}

	/// Run the underlying validation callable. A field without one passes.
	pub fn run(
		&self,
		value: &serde_json::Value,
		bound: &HashMap<String, serde_json::Value>,
	) -> FieldResult<Option<serde_json::Value>> {
		match &self.func {
			Some(func) => func(value, bound).map_err(FieldError::Validation),
			None => Ok(None),
		}
	}
}

impl PartialEq for FieldValidator {
	fn eq(&self, other: &Self) -> bool {
		self.model == other.model && self.field == other.field
	}
}

impl fmt::Debug for FieldValidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldValidator")
			.field("model", &self.model)
			.field("field", &self.field)
			.finish()
	}
}

/// One entry in a field's validator chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
	/// Fails with [`FieldError::Required`] when the value is absent.
	Required,
	/// Stops the chain, successfully, when the value is absent.
	Optional,
	/// Delegates to the model field's own validation callable.
	Field(FieldValidator),
}

impl Validator {
	pub fn run(
		&self,
		value: &serde_json::Value,
		bound: &HashMap<String, serde_json::Value>,
	) -> FieldResult<Verdict> {
		match self {
			Validator::Required => {
				if is_empty_value(value) {
					Err(FieldError::Required)
				} else {
					Ok(Verdict::Continue(None))
				}
			}
			Validator::Optional => {
				if is_empty_value(value) {
					Ok(Verdict::Stop)
				} else {
					Ok(Verdict::Continue(None))
				}
			}
			Validator::Field(validator) => validator.run(value, bound).map(Verdict::Continue),
		}
	}
}
