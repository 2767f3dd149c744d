//! Form built from a model schema
//!
//! A [`Form`] is an ephemeral per-submission object: construct it from a
//! schema, bind submitted data, validate once, then read `errors`,
//! `form_errors`, and `cleaned_data`.

use crate::conversion::{ConvertError, FieldDescriptor, model_fields};
use crate::field::{FormField, is_empty_value};
use crate::schema::{ModelSchema, RootValidatorFn};
use crate::validators::Verdict;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// A form whose fields were derived from a model schema.
///
/// Field order follows the schema's declaration order. The schema's pre-
/// and post-root validators are captured at construction; the form never
/// reaches back into the schema afterwards.
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, serde_json::Value>,
	cleaned: HashMap<String, serde_json::Value>,
	errors: HashMap<String, Vec<String>>,
	form_errors: Vec<String>,
	is_bound: bool,
	pre_root_validators: Vec<RootValidatorFn>,
	post_root_validators: Vec<RootValidatorFn>,
}

impl fmt::Debug for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Form")
			.field(
				"fields",
				&self.fields.iter().map(|field| field.name()).collect::<Vec<_>>(),
			)
			.field("data", &self.data)
			.field("cleaned", &self.cleaned)
			.field("errors", &self.errors)
			.field("form_errors", &self.form_errors)
			.field("is_bound", &self.is_bound)
			.finish_non_exhaustive()
	}
}

impl Form {
	/// Build a form from every field declared on the schema.
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::form::Form;
	/// use schema_forms::schema::{FieldType, ModelField, ModelSchema};
	///
	/// let schema = ModelSchema::new("Person")
	///     .with_field(ModelField::new("identifier", FieldType::Text))
	///     .with_field(ModelField::new("age", FieldType::Integer));
	///
	/// let form = Form::from_model(&schema).unwrap();
	/// assert_eq!(form.fields().len(), 2);
	/// ```
	pub fn from_model(schema: &ModelSchema) -> Result<Self, ConvertError> {
		Self::from_model_selected(schema, &[], &[])
	}

	/// Build a form from a filtered field selection (`only − exclude`,
	/// empty `only` meaning all fields).
	pub fn from_model_selected(
		schema: &ModelSchema,
		only: &[&str],
		exclude: &[&str],
	) -> Result<Self, ConvertError> {
		Self::from_descriptors(model_fields(schema, only, exclude), schema)
	}

	/// Build a form from already-enumerated descriptors, allowing callers
	/// to override metadata or set explicit factories first.
	pub fn from_descriptors(
		descriptors: Vec<(String, FieldDescriptor)>,
		schema: &ModelSchema,
	) -> Result<Self, ConvertError> {
		let mut fields = Vec::with_capacity(descriptors.len());
		for (_, descriptor) in &descriptors {
			fields.push(descriptor.construct()?);
		}
		Ok(Self {
			fields,
			data: HashMap::new(),
			cleaned: HashMap::new(),
			errors: HashMap::new(),
			form_errors: vec![],
			is_bound: false,
			pre_root_validators: schema.pre_root_validators().to_vec(),
			post_root_validators: schema.post_root_validators().to_vec(),
		})
	}

	/// Bind submitted data for validation.
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.data = data;
		self.cleaned.clear();
		self.errors.clear();
		self.form_errors.clear();
		self.is_bound = true;
	}

	/// Validate bound data.
	///
	/// Every field's validator chain runs first (absent values fall back to
	/// the field default); a failure on one field does not stop its
	/// siblings. Fields validate in declaration order, updating the bound
	/// map as they pass, so a cross-field rule sees cleaned values for
	/// earlier-declared siblings and raw submitted values for later ones.
	/// Root validators run only when every field passed: pre-root then
	/// post-root, each independently, with every failure message appended
	/// to `form_errors`. Returns true only when both error channels are
	/// empty.
	pub fn validate(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();
		self.form_errors.clear();

		// Submitted value, or the field default when absent.
		let mut bound: HashMap<String, serde_json::Value> = HashMap::new();
		for field in &self.fields {
			let value = self
				.data
				.get(field.name())
				.cloned()
				.or_else(|| field.default().cloned())
				.unwrap_or(serde_json::Value::Null);
			bound.insert(field.name().to_string(), value);
		}

		for field in &self.fields {
			let name = field.name().to_string();
			let raw = bound.get(&name).cloned().unwrap_or(serde_json::Value::Null);

			// Empty input skips type coercion so the presence validator can
			// rule on it first.
			let mut value = if is_empty_value(&raw) {
				raw
			} else {
				match field.clean(&raw) {
					Ok(cleaned) => cleaned,
					Err(e) => {
						self.errors.entry(name).or_default().push(e.to_string());
						continue;
					}
				}
			};

			let mut failed = false;
			for validator in field.validators() {
				match validator.run(&value, &bound) {
					Ok(Verdict::Continue(Some(normalized))) => value = normalized,
					Ok(Verdict::Continue(None)) => {}
					Ok(Verdict::Stop) => break,
					Err(e) => {
						self.errors
							.entry(name.clone())
							.or_default()
							.push(e.to_string());
						failed = true;
						break;
					}
				}
			}
			if !failed {
				bound.insert(name, value);
			}
		}

		if self.errors.is_empty() {
			// Root validators are about relationships between fields; every
			// independent violation is reported in one pass.
			for validator in self
				.pre_root_validators
				.iter()
				.chain(self.post_root_validators.iter())
			{
				if let Err(message) = validator(&bound) {
					self.form_errors.push(message);
				}
			}
		}

		self.cleaned = bound;
		self.errors.is_empty() && self.form_errors.is_empty()
	}

	/// Per-field error messages, keyed by field name.
	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	/// Root-validator failure messages, never attached to a single field.
	pub fn form_errors(&self) -> &[String] {
		&self.form_errors
	}

	/// Cleaned values from the last `validate` call.
	pub fn cleaned_data(&self) -> &HashMap<String, serde_json::Value> {
		&self.cleaned
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	/// Switch the named fields to their non-editable presentation variant.
	/// Unknown names are ignored; repeating a name is a no-op.
	pub fn readonly(&mut self, names: &[&str]) {
		for field in &mut self.fields {
			if names.contains(&field.name()) && !field.is_readonly() {
				field.set_readonly();
			}
		}
	}

	/// Switch every field to its non-editable presentation variant.
	pub fn readonly_all(&mut self) {
		for field in &mut self.fields {
			if !field.is_readonly() {
				field.set_readonly();
			}
		}
	}
}

impl Index<&str> for Form {
	type Output = Box<dyn FormField>;

	fn index(&self, name: &str) -> &Self::Output {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.unwrap_or_else(|| panic!("Field '{}' not found", name))
	}
}
